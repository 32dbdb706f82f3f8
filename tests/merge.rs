mod common;

use profcov::error::CoverageError;
use profcov::model::ClassCoverage;
use profcov::package::PackageCoverage;
use profcov::parsers::llvm_cov::LlvmCovParser;
use profcov::parsers::Parser;

#[test]
fn merge_sums_hit_counts_across_runs() {
    let text = common::fixture("llvm_cov_show.txt");
    let classes = LlvmCovParser::new(Some(common::SOURCE_ROOT.to_string()))
        .parse(&text)
        .unwrap();
    // Cart.m appears twice in the report.
    assert_eq!(classes.len(), 5);

    let root = PackageCoverage::build_tree(classes).unwrap();
    let model = &root.packages()[0].packages()[0];
    assert_eq!(model.path(), "Shop/Model");

    let cart = &model.classes()[0];
    assert_eq!(cart.path(), "Shop/Model/Cart.m");
    assert_eq!(
        cart.line_hits(),
        [(2, 4), (3, 4), (4, 4), (6, 2), (7, 2), (8, 0)]
    );
    assert_eq!(cart.raw_lines()[2], "4      |    3|- (NSUInteger)count {");
    assert_eq!(cart.raw_lines()[6], "2      |    7|- (void)clear { // a | b");
    assert_eq!(cart.raw_lines()[1], "       |    2|");
    assert_eq!(cart.total_line_hit_count(), 5);
}

#[test]
fn merge_keeps_first_occurrence_order() {
    let text = common::fixture("llvm_cov_show.txt");
    let classes = LlvmCovParser::new(Some(common::SOURCE_ROOT.to_string()))
        .parse(&text)
        .unwrap();
    let root = PackageCoverage::build_tree(classes).unwrap();

    let model = &root.packages()[0].packages()[0];
    let names: Vec<_> = model.classes().iter().filter_map(|c| c.filename()).collect();
    assert_eq!(names, ["Cart.m", "Item.m"]);
}

#[test]
fn merge_with_different_line_counts_aborts() {
    let text = common::fixture("llvm_cov_mismatch.txt");
    let classes = LlvmCovParser::new(Some(common::SOURCE_ROOT.to_string()))
        .parse(&text)
        .unwrap();

    let err = PackageCoverage::build_tree(classes).unwrap_err();
    match err {
        CoverageError::LineCountMismatch { path, left, right } => {
            assert_eq!(path, "Shop/Model/Cart.m");
            assert_eq!(left, 2);
            assert_eq!(right, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn merge_repeated_file_in_last_block() {
    let text = common::fixture("llvm_cov_repeated_last.txt");
    let classes = LlvmCovParser::new(Some(common::SOURCE_ROOT.to_string()))
        .parse(&text)
        .unwrap();
    assert_eq!(classes.len(), 3);

    let root = PackageCoverage::build_tree(classes).unwrap();
    let model = &root.packages()[0].packages()[0];
    let cart = &model.classes()[0];
    assert_eq!(cart.filename(), Some("Cart.m"));
    assert_eq!(cart.raw_lines().len(), 4);
    assert_eq!(cart.line_hits(), [(1, 4), (2, 4), (3, 5)]);
    assert_eq!(root.class_count(), 2);
}

#[test]
fn merge_last_block_with_or_without_trailing_blank_lines() {
    let parser = LlvmCovParser::new(Some("/src".to_string()));
    for input in [
        "/src/a.m:\n      1|    1|x\n/src/a.m:\n      2|    1|x",
        "/src/a.m:\n      1|    1|x\n/src/a.m:\n      2|    1|x\n",
        "/src/a.m:\n      1|    1|x\n\n/src/a.m:\n      2|    1|x\n\n",
    ] {
        let root = PackageCoverage::build_tree(parser.parse(input).unwrap()).unwrap();
        let a = &root.classes()[0];
        assert_eq!(a.raw_lines(), ["3      |    1|x"]);
        assert_eq!(a.total_line_hit_count(), 1);
    }
}

#[test]
fn merge_three_runs() {
    let run = |hits: &str| {
        let first = format!("{hits:>7}|    1|x");
        ClassCoverage::new("Shop/a.m", common::lines(&[first.as_str(), "       |    2|y"]))
    };
    let root = PackageCoverage::build_tree(vec![run("1"), run("0"), run("5")]).unwrap();
    assert_eq!(root.packages()[0].classes()[0].line_hits(), [(0, 6)]);
    assert_eq!(root.class_count(), 1);
}
