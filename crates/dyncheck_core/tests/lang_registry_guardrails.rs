use std::collections::HashMap;

use dyncheck_core::lang::assertions::{self, AssertionId};

#[test]
fn assertion_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, AssertionId> = HashMap::new();

    for info in assertions::ASSERTIONS {
        let item = &info.item;
        assert_eq!(
            assertions::from_str(item.canonical),
            Some(item.id),
            "assertion canonical spelling not resolvable: {}",
            item.canonical
        );
        assert_eq!(
            assertions::as_str(item.id),
            item.canonical,
            "assertion as_str mismatch for {:?}",
            item.id
        );

        if let Some(prev) = seen.insert(item.canonical, item.id) {
            panic!("duplicate assertion spelling {:?}: {:?} and {:?}", item.canonical, prev, item.id);
        }

        for &alias in item.aliases {
            assert_eq!(
                assertions::from_str(alias),
                Some(item.id),
                "assertion alias not resolvable: {}",
                alias
            );
            if let Some(prev) = seen.insert(alias, item.id) {
                panic!("duplicate assertion alias spelling {:?}: {:?} and {:?}", alias, prev, item.id);
            }
        }
    }
}

#[test]
fn assertion_lookup_is_case_sensitive() {
    assert_eq!(assertions::from_str("assertTrue"), Some(AssertionId::True));
    assert_eq!(assertions::from_str("asserttrue"), None);
    assert_eq!(assertions::from_str("ASSERT_TRUE"), None);
}

#[test]
fn every_assertion_is_documented() {
    for info in assertions::ASSERTIONS {
        assert!(
            !info.item.description.is_empty(),
            "missing description for {}",
            info.item.canonical
        );
        assert!(info.item.canonical.starts_with("assert"));
        assert!(!info.phrase.is_empty());
    }
}
