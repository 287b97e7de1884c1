//! Property tests: rendering a valid record and parsing it back is lossless.

use fmtrc_config::{CaseStyle, FormatConfig, LineEnding};
use proptest::prelude::*;

fn case_style() -> impl Strategy<Value = CaseStyle> {
    prop::sample::select(CaseStyle::ALL.to_vec())
}

fn line_ending() -> impl Strategy<Value = LineEnding> {
    prop::sample::select(LineEnding::ALL.to_vec())
}

prop_compose! {
    fn valid_config()(
        line_width in 1u32..=1000,
        tab_size in 1u32..=16,
        flags in prop::array::uniform6(any::<bool>()),
        counts in prop::array::uniform4(0u32..=64),
        keyword_case in case_style(),
        command_case in case_style(),
        always_wrap in prop::collection::vec("[ -~]{0,12}", 0..4),
        min_prefix_chars in 0u32..=32,
        prefix_span in 0u32..=32,
        line_ending in line_ending(),
    ) -> FormatConfig {
        FormatConfig {
            line_width,
            tab_size,
            use_tabchars: flags[0],
            max_subgroups_hwrap: counts[0],
            separate_ctrl_name_with_space: flags[1],
            separate_fn_name_with_space: flags[2],
            keyword_case,
            command_case,
            always_wrap,
            enable_sort: flags[3],
            autosort: flags[4],
            dangle_parens: flags[5],
            max_pargs_hwrap: counts[1],
            min_prefix_chars,
            max_prefix_chars: min_prefix_chars + prefix_span,
            max_lines_hwrap: counts[2],
            line_ending,
        }
    }
}

proptest! {
    #[test]
    fn rendered_source_parses_to_same_record(config in valid_config()) {
        let text = config.to_source();
        let reparsed = FormatConfig::from_source(&text).unwrap();
        prop_assert_eq!(reparsed, config);
    }

    #[test]
    fn parsing_twice_gives_equal_records(config in valid_config()) {
        let text = config.to_source();
        prop_assert_eq!(
            FormatConfig::from_source(&text).unwrap(),
            FormatConfig::from_source(&text).unwrap()
        );
    }
}
