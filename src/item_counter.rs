use crate::item::Item;
use crate::itemset::Itemset;

pub struct ItemCounter {
    counter: Vec<u32>,
}

impl ItemCounter {
    pub fn new(num_items: usize) -> ItemCounter {
        ItemCounter {
            counter: vec![0; num_items],
        }
    }
    pub fn add(&mut self, item: &Item, count: u32) {
        let index = item.as_index();
        if self.counter.len() <= index {
            self.counter.resize(index + 1, 0);
        }
        self.counter[index] += count;
    }
    pub fn add_transaction(&mut self, transaction: &Itemset) {
        for item in transaction.iter() {
            self.add(&item, 1);
        }
    }
    pub fn get(&self, item: &Item) -> u32 {
        let index = item.as_index();
        if index >= self.counter.len() {
            0
        } else {
            self.counter[index]
        }
    }
}
