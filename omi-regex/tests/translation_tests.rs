//! Translation test suite
//!
//! Real policy patterns and the regexes they must translate to.

use omi_regex::{
    TranslateError, adapt_var_name, classify, compile, is_gratuitously_regexed_integer, render,
    translate, translate_complex_tokens, varbind_value,
};

mod simple_tokens {
    use super::*;

    #[test]
    fn test_hostname_pattern() {
        assert_eq!(
            translate("^fa-<*>a.<*>example.gov$").unwrap(),
            "^fa-.*?a..*?example.gov$"
        );
    }

    #[test]
    fn test_every_simple_token_compiles() {
        for pattern in ["<*>", "<@>", "<#>", "<_>", "</>", "<S>"] {
            assert!(compile(pattern).is_ok(), "{pattern}");
        }
    }

    #[test]
    fn test_simple_token_matching() {
        let digits = compile("^port <#>$").unwrap();
        assert!(digits.is_match("port 8080").unwrap());
        assert!(!digits.is_match("port eighty").unwrap());

        let separators = compile("^a<_>b$").unwrap();
        assert!(separators.is_match("a_/:-b").unwrap());
        assert!(!separators.is_match("a b").unwrap());

        let lines = compile("^a</>b$").unwrap();
        assert!(lines.is_match("a\r\nb").unwrap());
    }
}

mod complex_tokens {
    use super::*;

    #[test]
    fn test_counted_named_token() {
        assert_eq!(
            translate("opener <4*.stuff> closer").unwrap(),
            ".*opener (?<stuff>.{4}) closer.*"
        );
        assert_eq!(
            translate_complex_tokens("opener <4*.stuff> closer").unwrap(),
            "opener (?<stuff>.{4}) closer"
        );
    }

    #[test]
    fn test_multiple_action_groups() {
        assert_eq!(
            translate("Did <4*.stuff> with <8@.thing> and <16#.tertiary> while <32_> yes I did")
                .unwrap(),
            ".*Did (?<stuff>.{4}) with (?<thing>\\w{8}) and (?<tertiary>\\d{16}) while (?:_|/|:|-){32} yes I did.*"
        );
    }

    #[test]
    fn test_cpu_busy_alarm() {
        let pattern = "Major:CPU_Busy_Alarm <1*><@.cpu>,<@.workload><1*> due to cpu_busy_alias<*.cpu_busy>,proc_queuelength_alias<*.proc_queue>,<*>workload_cpu_alias<*.workload_cpu>";
        assert_eq!(
            translate(pattern).unwrap(),
            ".*Major:CPU_Busy_Alarm .{1}(?<cpu>\\w+?),(?<workload>\\w+?).{1} due to cpu_busy_alias(?<cpuBusy>.*?),proc_queuelength_alias(?<procQueue>.*?),.*?workload_cpu_alias(?<workloadCpu>.*?).*"
        );

        let compiled = compile(pattern).unwrap();
        assert_eq!(
            compiled.capture_names(),
            ["cpu", "workload", "cpuBusy", "procQueue", "workloadCpu"]
        );
    }

    #[test]
    fn test_repeated_variable_in_alternation() {
        let pattern = "^/<*>/[<*.source>%<@>|<*.source>]$";
        assert_eq!(
            render(pattern).unwrap(),
            "^/.*?/((?<source>.*?)%\\w+?|(?<source>.*?))$"
        );
        assert!(matches!(
            translate(pattern),
            Err(TranslateError::DuplicateCaptureName { ref name, .. }) if name == "source"
        ));
    }
}

mod groups {
    use super::*;

    #[test]
    fn test_assign_only_group() {
        assert_eq!(
            translate("I need a <[foo|bar].thing>, please").unwrap(),
            ".*I need a (?<thing>(foo|bar)), please.*"
        );
    }

    #[test]
    fn test_square_groups() {
        assert_eq!(
            translate("This [foo|bar] is whatever").unwrap(),
            ".*This (foo|bar) is whatever.*"
        );
        assert_eq!(
            translate("Th[is one|ese[two|three|many]] [is|are] a number").unwrap(),
            ".*Th(is one|ese(two|three|many)) (is|are) a number.*"
        );
    }

    #[test]
    fn test_mixed_bag() {
        assert_eq!(
            translate("^<[<*>Common/rbac<*>].message>$").unwrap(),
            "^(?<message>(.*?Common/rbac.*?))$"
        );
    }

    #[test]
    fn test_negation() {
        let regex = translate("<![Warning]>").unwrap();
        assert!(regex.contains("(?!"));
        assert!(regex.contains("Warning"));

        let compiled = compile("^<![Warning]><*>$").unwrap();
        assert!(compiled.is_match("Error: disk full").unwrap());
        assert!(!compiled.is_match("Warning: disk full").unwrap());
    }

    #[test]
    fn test_negated_alternation() {
        let compiled = compile("^<![Info|Debug]><@>: <*.text>$").unwrap();
        assert!(!compiled.is_match("Info: hello").unwrap());
        let caps = compiled.named_captures("Error: boom").unwrap().unwrap();
        assert_eq!(caps, vec![("text".to_string(), "boom".to_string())]);
    }
}

mod constraint_values {
    use super::*;

    #[test]
    fn test_var_name_adaptation() {
        assert_eq!(adapt_var_name("host_name"), "hostName");
        assert_eq!(adapt_var_name("host_name-too"), "hostNameToo");
        assert_eq!(adapt_var_name("message"), "message");
    }

    #[test]
    fn test_anchored_integer_detection() {
        assert!(is_gratuitously_regexed_integer("^42$"));
        assert!(!is_gratuitously_regexed_integer("^abc$"));
        assert_eq!(varbind_value("^0$"), "0");
    }

    #[test]
    fn test_disk_response_varbind() {
        assert_eq!(
            varbind_value("^<@.server> - Critical:High_Disk_Response <@> <*.message> at"),
            "~^(?<server>\\w+?) - Critical:High_Disk_Response \\w+? (?<message>.*?) at.*"
        );
    }

    #[test]
    fn test_literal_passes_through() {
        let value = classify("coldStart");
        assert!(!value.is_pattern());
        assert_eq!(value.to_varbind_value(), "coldStart");
    }

    #[test]
    fn test_catch_all() {
        assert_eq!(varbind_value("<*>"), "~.*.*?.*");
        assert!(compile("<*>").unwrap().is_match("").unwrap());
    }
}
