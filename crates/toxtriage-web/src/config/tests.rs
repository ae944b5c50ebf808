#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_default_thresholds_are_ordered() {
        let pipeline = PipelineConfig::default();
        assert!(pipeline.flag_threshold > pipeline.escalate_threshold,
            "Flag threshold ({}) should be above escalation threshold ({})",
            pipeline.flag_threshold, pipeline.escalate_threshold);
        assert_eq!(pipeline.escalate_threshold, 0.40);
        assert_eq!(pipeline.flag_threshold, 0.50);
    }

    #[test]
    fn test_default_server_binding() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8000);
    }

    #[test]
    fn test_defaults_have_no_cloud_key() {
        let config = Config::default();
        assert!(config.gemini.is_none());
        assert!(config.ollama.auto_pull);
        assert_eq!(config.ollama.model, "llama3.2");
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let gemini = GeminiConfig {
            api_key: "AIza-from-config".to_string(),
            model: default_gemini_model(),
        };
        assert_eq!(gemini.resolve_api_key().as_deref(), Some("AIza-from-config"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9001

            [gemini]
            model = "gemini-1.5-pro"

            [pipeline]
            escalate_threshold = 0.3
            "#,
        ).unwrap();

        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.gemini.as_ref().unwrap().model, "gemini-1.5-pro");
        assert!(config.gemini.as_ref().unwrap().api_key.is_empty());
        assert_eq!(config.pipeline.escalate_threshold, 0.3);
        assert_eq!(config.pipeline.flag_threshold, 0.50);
        assert_eq!(config.classifier.base_url, "http://localhost:8080");
        assert_eq!(config.dataset.path, "data/benchmark.csv");
    }
}
