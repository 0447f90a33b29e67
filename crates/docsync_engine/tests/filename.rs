use docsync_engine::{content_hash, derive_output_id, is_valid_output_id, OutputNaming};
use pretty_assertions::assert_eq;

#[test]
fn nested_path_is_flattened() {
    assert_eq!(derive_output_id("https://host/a/b/page.html"), "a__b__page.md");
}

#[test]
fn reserved_bare_name_gets_suffix() {
    assert_eq!(derive_output_id("https://host/sdk.html"), "sdk-overview.md");
    assert_eq!(
        derive_output_id("https://docs.workato.com/en/developing-connectors/sdk.html"),
        "sdk-overview.md"
    );
}

#[test]
fn query_and_fragment_do_not_matter() {
    let plain = derive_output_id("https://host/docs/guides.html");
    assert_eq!(derive_output_id("https://host/docs/guides.html#x"), plain);
    assert_eq!(derive_output_id("https://host/docs/guides.html?lang=en"), plain);
    assert_eq!(plain, "docs__guides.md");
}

#[test]
fn longest_known_prefix_is_stripped_first() {
    assert_eq!(
        derive_output_id(
            "https://docs.workato.com/en/developing-connectors/sdk/guides/config_fields.html"
        ),
        "guides__config_fields.md"
    );
    assert_eq!(
        derive_output_id("https://docs.workato.com/en/developing-connectors/http.html"),
        "http.md"
    );
}

#[test]
fn prefix_order_in_config_does_not_matter() {
    let naming = OutputNaming {
        strip_prefixes: vec!["en__".to_string(), "en__docs__".to_string()],
        ..OutputNaming::default()
    };
    assert_eq!(naming.output_id("https://host/en/docs/page.html"), "page.md");
}

#[test]
fn trailing_slash_and_existing_md_suffix() {
    assert_eq!(derive_output_id("https://host/guide/"), "guide.md");
    assert_eq!(derive_output_id("https://host/notes/readme.md"), "notes__readme.md");
}

#[test]
fn bare_host_yields_unusable_name() {
    let output_id = derive_output_id("https://host");
    assert_eq!(output_id, ".md");
    assert!(!is_valid_output_id(&output_id));
}

#[test]
fn output_id_validation() {
    assert!(is_valid_output_id("cli.md"));
    assert!(!is_valid_output_id("cli.txt"));
    assert!(!is_valid_output_id("a/b.md"));
    assert!(!is_valid_output_id("..\\b.md"));
}

#[test]
fn content_hash_is_hex_sha256() {
    assert_eq!(
        content_hash(""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        content_hash("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn path_is_taken_as_written() {
    assert_eq!(derive_output_id("https://host/en/über.html"), "en__über.md");
    assert_eq!(derive_output_id("https://host/a b/page.html"), "a b__page.md");
    assert_eq!(
        derive_output_id("https://host/a/../b/page.html"),
        "a__..__b__page.md"
    );
    assert_eq!(derive_output_id("https://host:8443/x.html?next=/y/z"), "x.md");
}
