//! Process-wide registry of field maps keyed by type.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use super::{FieldMap, GridFields};

type Registry = RwLock<HashMap<TypeId, &'static OnceLock<FieldMap>>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Returns the field map of `T`, building it on first use.
///
/// The map is built at most once per type even when several threads race on
/// first use, and every call returns the same immutable instance. No registry
/// lock is held while the map is built, so `GridFields` impls may look up the
/// maps of other types.
pub fn field_map<T: GridFields>() -> &'static FieldMap {
    cell_for(TypeId::of::<T>()).get_or_init(|| {
        let map = FieldMap::for_type::<T>();
        log::debug!(
            "Built field map for {} with {} fields",
            type_name::<T>(),
            map.len()
        );
        map
    })
}

/// Per-type slot, registered empty and filled by [`field_map`].
fn cell_for(key: TypeId) -> &'static OnceLock<FieldMap> {
    let registry = REGISTRY.get_or_init(Registry::default);

    // Entries are only ever inserted whole, so a poisoned lock is still consistent.
    if let Some(cell) = registry
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .copied()
    {
        return cell;
    }

    *registry
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(key)
        .or_insert_with(|| Box::leak(Box::new(OnceLock::new())))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;
    use crate::fields::FieldSpec;

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl GridFields for Counted {
        fn grid_fields() -> Vec<FieldSpec> {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            vec![FieldSpec::new("name"), FieldSpec::new("email")]
        }
    }

    struct Other;

    impl GridFields for Other {
        fn grid_fields() -> Vec<FieldSpec> {
            vec![FieldSpec::new("title").maps_to("meta.title")]
        }
    }

    #[test]
    fn builds_once_under_concurrent_first_use() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| field_map::<Counted>() as *const FieldMap as usize))
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));

        let map = field_map::<Counted>();
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert_eq!(map.len(), 2);
        assert!(map.contains("Name"));
    }

    struct Composite;

    impl GridFields for Composite {
        fn grid_fields() -> Vec<FieldSpec> {
            let mut fields = vec![FieldSpec::new("id")];
            if field_map::<Other>().contains("title") {
                fields.push(FieldSpec::new("title").maps_to("meta.title"));
            }
            fields
        }
    }

    #[test]
    fn build_may_look_up_other_types() {
        let map = field_map::<Composite>();

        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve("Title"), Some("meta.title"));
    }

    #[test]
    fn maps_are_kept_per_type() {
        let other = field_map::<Other>();

        assert_eq!(other.resolve("TITLE"), Some("meta.title"));
        assert!(!other.contains("name"));
        assert!(!std::ptr::eq(other, field_map::<Counted>()));
    }
}
