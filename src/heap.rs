//! Generic binary min-heap keyed by a caller comparator.
//!
//! Used only by the Huffman tree builder: insert every leaf, then
//! repeatedly extract the two smallest-frequency items and reinsert their
//! combination. A plain `Vec` with sift-up/sift-down is simpler than
//! `std::collections::BinaryHeap<Reverse<T>>` here because the comparator
//! needs to be a runtime closure rather than an `Ord` impl on the element
//! (frequency lives alongside the tree node, not as a derivable total order).

pub struct MinHeap<T> {
    items: Vec<T>,
    less: Box<dyn Fn(&T, &T) -> bool>,
}

impl<T> MinHeap<T> {
    pub fn with_capacity<F>(capacity: usize, less: F) -> Self
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        Self { items: Vec::with_capacity(capacity), less: Box::new(less) }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        let mut i = self.items.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if (self.less)(&self.items[i], &self.items[parent]) {
                self.items.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    pub fn extract_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop();

        let mut i = 0;
        let n = self.items.len();
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;
            if left < n && (self.less)(&self.items[left], &self.items[smallest]) {
                smallest = left;
            }
            if right < n && (self.less)(&self.items[right], &self.items[smallest]) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.items.swap(i, smallest);
            i = smallest;
        }

        min
    }
}
