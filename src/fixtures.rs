#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    use crate::ConfigMap;

    /// Unwrap a `json!` object literal into a mapping.
    pub fn map(value: Value) -> ConfigMap {
        match value {
            Value::Object(m) => m,
            other => panic!("fixture is not an object: {other}"),
        }
    }

    pub fn sample_defaults() -> ConfigMap {
        map(json!({
            "host": "localhost",
            "port": 8080,
            "debug": false,
            "database": {
                "url": null,
                "pool_size": 5,
            },
        }))
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct TestConfig {
        pub host: String,
        pub port: u16,
        pub debug: bool,
        pub database: TestDbConfig,
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct TestDbConfig {
        pub url: Option<String>,
        pub pool_size: usize,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                host: "localhost".into(),
                port: 8080,
                debug: false,
                database: TestDbConfig {
                    url: None,
                    pool_size: 5,
                },
            }
        }
    }

    #[test]
    fn typed_defaults_match_sample() {
        let value = serde_json::to_value(TestConfig::default()).unwrap();
        assert_eq!(map(value), sample_defaults());
    }
}
