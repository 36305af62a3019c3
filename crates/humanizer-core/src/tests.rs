//! Snapshot tests for core types

#[cfg(test)]
mod snapshot_tests {
    use crate::{HumanizeMethod, HumanizeRequest, RequestSettings};
    use insta::{assert_json_snapshot, assert_yaml_snapshot};

    #[test]
    fn test_settings_snapshot() {
        let settings = RequestSettings::parse("Friendly", "conversational", "shorter");

        assert_yaml_snapshot!(settings, @r###"
        tone: friendly
        style: conversational
        length: shorter
        "###);
    }

    #[test]
    fn test_settings_echo_keeps_raw_strings() {
        let request = HumanizeRequest::new("Some text.").with_tone("Sarcastic");

        assert_yaml_snapshot!(request.settings_echo(), @r###"
        tone: Sarcastic
        style: professional
        length: maintain
        "###);
    }

    #[test]
    fn test_method_wire_names() {
        assert_json_snapshot!(vec![HumanizeMethod::Model, HumanizeMethod::RuleBased], @r###"
        [
          "model",
          "rule-based"
        ]
        "###);
    }
}
