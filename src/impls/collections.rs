use alloc::{
    collections::{BTreeMap, VecDeque},
    format,
    string::String,
    vec::Vec,
};

#[cfg(feature = "std")]
use std::collections::HashMap as StdHashMap;

use hashbrown::HashMap as HashbrownMap;
use indexmap::IndexMap;

use crate::{Dump, Kind, Walker, type_label};

/// `[T]`, the descriptor shared by every sequence of `T` of unknown length.
fn sequence_label<T>() -> String {
    format!("[{}]", type_label::<T>())
}

/// `Name<K, V>`, without the hasher parameter some maps carry.
fn map_label<K, V>(name: &str) -> String {
    format!("{name}<{}, {}>", type_label::<K>(), type_label::<V>())
}

impl<T: Dump> Dump for [T] {
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.debug_seq(&sequence_label::<T>()).entries(self).finish();
    }
}

impl<T: Dump, const N: usize> Dump for [T; N] {
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.debug_seq(&type_label::<Self>()).entries(self).finish();
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::Sequence)
    }
}

impl<T: Dump> Dump for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        self.as_slice().dump(walker);
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::Sequence)
    }
}

impl<T: Dump> Dump for VecDeque<T> {
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.debug_seq(&sequence_label::<T>()).entries(self).finish();
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::Sequence)
    }
}

macro_rules! impl_map {
    ($name:literal, $ty:ident<K, V $(, $hasher:ident)?>) => {
        impl<K: Dump, V: Dump $(, $hasher)?> Dump for $ty<K, V $(, $hasher)?> {
            fn kind(&self) -> Kind {
                Kind::Map
            }

            // Iteration order, which is only stable for ordered maps.
            fn dump(&self, walker: &mut Walker<'_>) {
                walker
                    .debug_map(&map_label::<K, V>($name))
                    .entries(self.iter())
                    .finish();
            }

            fn static_kind() -> Option<Kind> {
                Some(Kind::Map)
            }
        }
    };
}

impl_map!("BTreeMap", BTreeMap<K, V>);
impl_map!("HashMap", HashbrownMap<K, V, S>);
impl_map!("IndexMap", IndexMap<K, V, S>);
#[cfg(feature = "std")]
impl_map!("HashMap", StdHashMap<K, V, S>);

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use crate::{DumpStyle, render};

    use super::*;

    #[test]
    fn test_sequence_descriptors() {
        let style = DumpStyle::DEFAULT;
        assert_eq!(render(&style, &vec![1_u8, 2]), "[u8]{ 1, 2 }");
        assert_eq!(render(&style, &[true, false]), "[bool; 2]{ true, false }");
        assert_eq!(
            render(&style, &VecDeque::from(vec!["a".to_string()])),
            "[String]{ \"a\" }"
        );
    }

    #[test]
    fn test_btree_map() {
        let mut map = BTreeMap::new();
        map.insert(2_i32, "two".to_string());
        map.insert(1_i32, "one".to_string());
        assert_eq!(
            render(&DumpStyle::DEFAULT, &map),
            "BTreeMap<i32, String>{ 1: \"one\", 2: \"two\" }"
        );
        assert_eq!(
            render(&DumpStyle::PRINT, &map),
            "BTreeMap<i32, String>{ 1: \"one\", 2: \"two\" }"
        );
    }

    #[test]
    fn test_map_with_composite_values() {
        let mut map = IndexMap::with_hasher(rustc_hash::FxBuildHasher);
        map.insert("a", vec![1_i32]);
        assert_eq!(
            render(&DumpStyle::PRINT, &map),
            "IndexMap<&str, Vec<i32>>{\n  \"a\": [i32]{ 1 },\n}"
        );
    }

    #[test]
    fn test_hashbrown_label_drops_hasher() {
        let mut map: HashbrownMap<u8, bool> = HashbrownMap::default();
        map.insert(7, true);
        assert_eq!(render(&DumpStyle::DEFAULT, &map), "HashMap<u8, bool>{ 7: true }");
    }
}
