//! `[format]` options installed as the process-wide default provider.
//!
//! Installation is process-wide, so this binary holds a single test.

use corshim_engine::boxed::{BoxedDouble, BoxedSingle};
use corshim_engine::{BoxedValue, OptionsError, ShimOptions};
use corshim_sdk::NumberFormatInfo;

// ============================================================================
// Default Provider
// ============================================================================

#[test]
fn test_format_section_becomes_default_provider() {
    let options = ShimOptions::from_str(
        r#"
[format]
decimal_separator = ","
group_separator = "."
percent_symbol = "pct"
"#,
    )
    .unwrap();
    options.install_formatter().unwrap();

    let double = BoxedDouble::new(1234.5);
    assert_eq!(double.format(Some("N2"), None).unwrap(), "1.234,50");
    assert_eq!(
        BoxedValue::new(1234567i32).format(Some("N0"), None).unwrap(),
        "1.234.567"
    );
    assert_eq!(
        BoxedSingle::new(0.25).format(Some("P0"), None).unwrap(),
        "25 pct"
    );

    // An explicit provider still wins.
    let invariant = NumberFormatInfo::invariant();
    assert_eq!(
        double.format(Some("N2"), Some(&invariant)).unwrap(),
        "1,234.50"
    );

    // Canonical text ignores the configured symbols.
    assert_eq!(double.to_string(), "1234.5");
    assert_eq!(double.format(None, None).unwrap(), "1234.5");

    assert!(matches!(
        ShimOptions::default().install_formatter(),
        Err(OptionsError::FormatterAlreadyInstalled)
    ));
    assert_eq!(double.format(Some("N2"), None).unwrap(), "1.234,50");
}
