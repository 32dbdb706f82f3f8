#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing and tree construction must not panic on any input.
    if let Ok(s) = std::str::from_utf8(data) {
        let classes = profcov::parsers::llvm_cov::parse(s, Some("/"));
        if let Ok(root) = profcov::package::PackageCoverage::build_tree(classes) {
            let _ = profcov::report::CoverageReport::new(root, None).to_document();
        }
    }
});
