use std::fs;

use liga_table::asset::{AssetResolver, ImageSource, logo_html};
use liga_table::report::decorate;
use liga_table::{Team, compute_standings};

// PNG signature only; contents are never decoded.
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[test]
fn network_refs_pass_through() {
    let resolver = AssetResolver::new();
    for logo in [
        "https://example.test/a.png",
        "HTTP://example.test/b.png",
        "data:image/png;base64,AAAA",
    ] {
        let resolved = resolver.resolve(logo);
        assert_eq!(resolved.source, ImageSource::Remote(logo.to_string()));
        assert!(resolved.warning.is_none());
    }
}

#[test]
fn local_file_is_embedded_as_data_uri() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::create_dir_all(dir.path().join("logos")).expect("logo dir");
    fs::write(dir.path().join("logos/racing.png"), PNG_BYTES).expect("write logo");

    let resolver = AssetResolver::with_base_dir(dir.path());
    let resolved = resolver.resolve("logos/racing.png");
    assert!(resolved.warning.is_none());
    assert_eq!(
        resolved.source,
        ImageSource::Embedded("data:image/png;base64,iVBORw0KGgo=".to_string())
    );
    assert!(logo_html(&resolved.source, 24).starts_with(r#"<img src="data:image/png;base64,"#));
}

#[test]
fn missing_file_yields_placeholder_and_warning() {
    let dir = tempfile::tempdir().expect("temp dir");
    let resolver = AssetResolver::with_base_dir(dir.path());
    let resolved = resolver.resolve("logos/nope.png");
    assert_eq!(resolved.source, ImageSource::Placeholder);
    let warning = resolved.warning.expect("warning reported");
    assert_eq!(warning.logo_ref, "logos/nope.png");
    assert!(warning.reason.contains("nope.png"));
}

#[test]
fn empty_ref_is_a_silent_placeholder() {
    let resolved = AssetResolver::new().resolve("  ");
    assert!(resolved.source.is_placeholder());
    assert!(resolved.warning.is_none());
}

#[test]
fn unreadable_logos_do_not_change_ranking() {
    let dir = tempfile::tempdir().expect("temp dir");
    let teams = vec![
        Team::new("1", "Alpha", "missing/alpha.png"),
        Team::new("2", "Beta", "https://example.test/beta.png"),
    ];
    let rows = compute_standings(&teams, &[]).expect("valid");
    let (decorated, warnings) = decorate(rows.clone(), &AssetResolver::with_base_dir(dir.path()), 24);

    assert_eq!(warnings.len(), 1);
    assert_eq!(decorated.len(), 2);
    for (row, plain) in decorated.iter().zip(&rows) {
        assert_eq!(&row.row, plain);
    }
    assert!(decorated[0].logo.is_placeholder());
    assert_eq!(decorated[0].logo_html, "");
}
