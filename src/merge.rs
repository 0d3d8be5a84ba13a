use serde_json::Value;

use crate::ConfigMap;

/// Deep-merge `overlay` on top of `base`.
/// If both sides have a mapping for the same key, recurse.
/// Otherwise, `overlay`'s value wins. Sequences are replaced, not combined.
/// Keys keep their position in `base`; keys only in `overlay` are appended.
pub fn deep_merge(mut base: ConfigMap, overlay: ConfigMap) -> ConfigMap {
    for (key, overlay_val) in overlay {
        let Some(slot) = base.get_mut(&key) else {
            base.insert(key, overlay_val);
            continue;
        };
        match (slot, overlay_val) {
            (Value::Object(base_map), Value::Object(overlay_map)) => {
                *base_map = deep_merge(std::mem::take(base_map), overlay_map);
            }
            (slot, overlay_val) => *slot = overlay_val,
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::map;
    use serde_json::json;

    #[test]
    fn disjoint_keys_merge() {
        let merged = deep_merge(map(json!({"host": "localhost"})), map(json!({"port": 3000})));
        assert_eq!(Value::Object(merged), json!({"host": "localhost", "port": 3000}));
    }

    #[test]
    fn same_scalar_key_overlay_wins() {
        let merged = deep_merge(map(json!({"port": 8080})), map(json!({"port": 3000})));
        assert_eq!(merged["port"], json!(3000));
    }

    #[test]
    fn persisted_leaf_wins_and_default_only_keys_survive() {
        let defaults = map(json!({"a": 1, "b": {"c": 2}}));
        let persisted = map(json!({"b": {"c": 99, "d": 5}}));
        let merged = deep_merge(defaults, persisted);
        assert_eq!(
            Value::Object(merged),
            json!({"a": 1, "b": {"c": 99, "d": 5}})
        );
    }

    #[test]
    fn overlay_scalar_replaces_mapping() {
        let merged = deep_merge(
            map(json!({"database": {"url": "x"}})),
            map(json!({"database": "flat_string"})),
        );
        assert_eq!(merged["database"], json!("flat_string"));
    }

    #[test]
    fn overlay_mapping_replaces_scalar() {
        let merged = deep_merge(
            map(json!({"database": "flat"})),
            map(json!({"database": {"url": "pg://"}})),
        );
        assert_eq!(merged["database"], json!({"url": "pg://"}));
    }

    #[test]
    fn sequences_are_replaced() {
        let merged = deep_merge(
            map(json!({"peers": ["a", "b", "c"]})),
            map(json!({"peers": ["z"]})),
        );
        assert_eq!(merged["peers"], json!(["z"]));
    }

    #[test]
    fn null_overlay_replaces_value() {
        let merged = deep_merge(map(json!({"a": 1})), map(json!({"a": null})));
        assert_eq!(merged["a"], Value::Null);
    }

    #[test]
    fn empty_overlay_returns_base() {
        let base = map(json!({"port": 8080}));
        let merged = deep_merge(base.clone(), ConfigMap::new());
        assert_eq!(merged, base);
    }

    #[test]
    fn empty_base_returns_overlay() {
        let overlay = map(json!({"port": 3000}));
        let merged = deep_merge(ConfigMap::new(), overlay.clone());
        assert_eq!(merged, overlay);
    }

    #[test]
    fn key_order_follows_base() {
        let merged = deep_merge(
            map(json!({"zeta": 1, "alpha": {"y": 1, "x": 2}, "mid": 3})),
            map(json!({"extra": 0, "mid": 30, "zeta": 10, "alpha": {"x": 20}})),
        );
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid", "extra"]);
        let nested: Vec<&str> = merged["alpha"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(nested, vec!["y", "x"]);
    }

    #[test]
    fn deeply_nested_three_levels() {
        let base = map(json!({"a": {"b": {"c": {"val": 1, "other": "keep"}}}}));
        let overlay = map(json!({"a": {"b": {"c": {"val": 99}}}}));
        let merged = deep_merge(base, overlay);
        assert_eq!(merged["a"]["b"]["c"], json!({"val": 99, "other": "keep"}));
    }
}
