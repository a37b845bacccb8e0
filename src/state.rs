//! Shared registry for callers that expose declarations across threads. One lock guards every mutation.

use crate::registry::Registry;
use parking_lot::RwLock;
use std::sync::Arc;

pub type SharedRegistry = Arc<RwLock<Registry>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::resources::Table;
    use std::thread;

    #[test]
    fn declarations_from_several_threads_all_land() {
        let shared: SharedRegistry = Registry::new().into_shared();
        let workers: Vec<_> = (0..4)
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    let mut registry = shared.write();
                    Table::declare(&mut registry, TableConfig::new(format!("table-{i}"))).unwrap();
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }
        assert_eq!(shared.read().resources().len(), 4);
    }
}
