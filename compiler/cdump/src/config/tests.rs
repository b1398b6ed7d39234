use super::*;
use pretty_assertions::assert_eq;

fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key: &str| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| (*value).to_owned())
    }
}

#[test]
fn defaults() {
    let config = DumpConfig::default();
    assert_eq!(config.id_scheme, IdScheme::Sequential);
    assert_eq!(config.run_id, 0);
    assert!(config.grow_stack);
}

#[test]
fn reads_overrides() {
    let config = DumpConfig::from_lookup(lookup_from(&[
        ("CDUMP_RUN_ID", "7"),
        ("CDUMP_ID_SCHEME", "node-index"),
    ]));
    assert_eq!(
        config,
        DumpConfig::new()
            .with_run_id(7)
            .with_id_scheme(IdScheme::NodeIndex)
    );
}

#[test]
fn ignores_bad_values() {
    let config = DumpConfig::from_lookup(lookup_from(&[
        ("CDUMP_RUN_ID", "-1"),
        ("CDUMP_ID_SCHEME", "random"),
    ]));
    assert_eq!(config, DumpConfig::default());
}

#[test]
fn scheme_roundtrips_through_text() {
    for scheme in [IdScheme::Sequential, IdScheme::NodeIndex] {
        assert_eq!(scheme.to_string().parse::<IdScheme>(), Ok(scheme));
    }
}
