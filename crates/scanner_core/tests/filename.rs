use scanner_core::extract_filename;
use url::Url;

fn name_of(raw: &str) -> String {
    extract_filename(&Url::parse(raw).unwrap())
}

#[test]
fn last_segment_with_extension_is_used() {
    assert_eq!(name_of("https://x.com/a/b/report.pdf"), "report.pdf");
    assert_eq!(name_of("https://x.com/a/b/report.pdf?v=3"), "report.pdf");
}

#[test]
fn query_parameters_are_checked_in_priority_order() {
    assert_eq!(name_of("https://x.com/download?file=notes.txt"), "notes.txt");
    assert_eq!(
        name_of("https://x.com/get?name=n.bin&file=f.bin&filename=fn.bin"),
        "fn.bin"
    );
    assert_eq!(name_of("https://x.com/get?name=n.bin&file=f.bin"), "f.bin");
}

#[test]
fn query_values_are_percent_decoded() {
    assert_eq!(name_of("https://x.com/get?filename=my%20file.txt"), "my file.txt");
}

#[test]
fn empty_query_values_are_ignored() {
    assert_eq!(name_of("https://x.com/get?filename=&file=data.csv"), "data.csv");
}

#[test]
fn falls_back_to_last_non_empty_segment() {
    assert_eq!(name_of("https://x.com/downloads/latest"), "latest");
    assert_eq!(name_of("https://x.com/downloads/latest/"), "latest");
}

#[test]
fn empty_path_yields_unknown_file() {
    assert_eq!(name_of("https://x.com/"), "unknown_file");
    assert_eq!(name_of("https://x.com"), "unknown_file");
}

#[test]
fn never_returns_an_empty_name() {
    for raw in [
        "https://x.com/",
        "https://x.com//",
        "https://x.com/?file=",
        "https://x.com/a/.",
        "https://x.com/a/b?x=1",
    ] {
        assert!(!name_of(raw).is_empty(), "{raw}");
    }
}
