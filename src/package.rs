//! Directory tree of packages built from a flat list of per-file records.
//!
//! Construction runs in four steps:
//!   1. merge records that share a path,
//!   2. bucket records by directory into flat packages,
//!   3. make sure the first flat package is the root,
//!   4. insert every other flat package into the root, creating the
//!      intermediate directories on the way.

use std::collections::HashMap;

use crate::error::{CoverageError, Result};
use crate::model::{format_rate, rate, ClassCoverage, PATH_SEPARATOR};
use crate::xml::XmlNode;

/// One directory in the package tree.
#[derive(Debug, Clone, Default)]
pub struct PackageCoverage {
    path_components: Vec<String>,
    classes: Vec<ClassCoverage>,
    packages: Vec<PackageCoverage>,
}

impl PackageCoverage {
    pub fn new(path_components: Vec<String>, classes: Vec<ClassCoverage>) -> Self {
        Self {
            path_components,
            classes,
            packages: Vec::new(),
        }
    }

    /// An empty root package.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build the full package tree from the records of one report.
    /// Fails if two records for the same path cannot be merged.
    pub fn build_tree(classes: Vec<ClassCoverage>) -> Result<PackageCoverage> {
        let classes = merge_duplicates(classes)?;
        let mut flat = to_flat_packages(classes);
        pad_root(&mut flat);

        let mut flat = flat.into_iter();
        let mut root = flat.next().unwrap_or_default();
        for package in flat {
            root.insert_child_in_tree(package)?;
        }
        Ok(root)
    }

    pub fn path_components(&self) -> &[String] {
        &self.path_components
    }

    pub fn path(&self) -> String {
        self.path_components.join(&PATH_SEPARATOR.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.path_components.is_empty()
    }

    /// Files directly in this directory.
    pub fn classes(&self) -> &[ClassCoverage] {
        &self.classes
    }

    /// Sub-directories one level down.
    pub fn packages(&self) -> &[PackageCoverage] {
        &self.packages
    }

    pub fn active_line_count(&self) -> u64 {
        self.classes.iter().map(ClassCoverage::active_line_count).sum::<u64>()
            + self.packages.iter().map(PackageCoverage::active_line_count).sum::<u64>()
    }

    pub fn total_line_hit_count(&self) -> u64 {
        self.classes.iter().map(ClassCoverage::total_line_hit_count).sum::<u64>()
            + self.packages.iter().map(PackageCoverage::total_line_hit_count).sum::<u64>()
    }

    #[must_use]
    pub fn line_rate(&self) -> f64 {
        rate(self.total_line_hit_count(), self.active_line_count())
    }

    pub fn branch_rate(&self) -> f64 {
        0.0
    }

    pub fn complexity(&self) -> f64 {
        0.0
    }

    /// Pre-order walk over this package and every package below it.
    pub fn walk(&self) -> Vec<&PackageCoverage> {
        let mut out = vec![self];
        for child in &self.packages {
            out.extend(child.walk());
        }
        out
    }

    /// Number of classes in the whole subtree.
    pub fn class_count(&self) -> usize {
        self.classes.len() + self.packages.iter().map(PackageCoverage::class_count).sum::<usize>()
    }

    /// Attach `package` at the position given by its path, creating any
    /// missing intermediate packages. Only valid on the root.
    pub fn insert_child_in_tree(&mut self, package: PackageCoverage) -> Result<()> {
        if !self.is_root() {
            return Err(CoverageError::TreeConstruction(format!(
                "cannot insert '{}' below non-root package '{}'",
                package.path(),
                self.path()
            )));
        }

        let PackageCoverage {
            path_components,
            classes,
            packages,
        } = package;

        let mut node = self;
        for depth in 1..=path_components.len() {
            let prefix = &path_components[..depth];
            let index = match node
                .packages
                .iter()
                .position(|p| p.path_components == prefix)
            {
                Some(index) => index,
                None => {
                    node.packages.push(PackageCoverage::new(prefix.to_vec(), Vec::new()));
                    node.packages.len() - 1
                }
            };
            node = &mut node.packages[index];
        }

        // The node may have been created earlier as an intermediate
        // directory, in which case it takes over the classes.
        node.classes.extend(classes);
        node.packages.extend(packages);
        Ok(())
    }

    /// Build the `<package>` element. Child packages are not nested; the
    /// document emits every package of the tree as a sibling.
    pub fn to_xml(&self) -> XmlNode {
        let mut package = XmlNode::new("package")
            .with_attr("branch-rate", format_rate(self.branch_rate()))
            .with_attr("complexity", format_rate(self.complexity()))
            .with_attr("line-rate", format_rate(self.line_rate()))
            .with_attr("name", self.path());

        if !self.classes.is_empty() {
            let classes = package.append(XmlNode::new("classes"));
            for class in &self.classes {
                classes.append(class.to_xml());
            }
        }
        package
    }
}

impl PartialEq for PackageCoverage {
    fn eq(&self, other: &Self) -> bool {
        self.path_components == other.path_components
    }
}

impl Eq for PackageCoverage {}

/// Merge records sharing a path into the first one seen. Output keeps the
/// position of each first occurrence.
fn merge_duplicates(classes: Vec<ClassCoverage>) -> Result<Vec<ClassCoverage>> {
    let mut result: Vec<ClassCoverage> = Vec::with_capacity(classes.len());
    let mut by_path: HashMap<String, usize> = HashMap::new();

    for class in classes {
        match by_path.get(class.path()) {
            Some(&index) => {
                tracing::debug!("Merging duplicate coverage for {}", class.path());
                let merged = result[index].merge(&class)?;
                result[index] = merged;
            }
            None => {
                by_path.insert(class.path().to_string(), result.len());
                result.push(class);
            }
        }
    }
    Ok(result)
}

/// One package per distinct directory, in first-occurrence order.
fn to_flat_packages(classes: Vec<ClassCoverage>) -> Vec<PackageCoverage> {
    let mut packages: Vec<PackageCoverage> = Vec::new();
    let mut by_dir: HashMap<Vec<String>, usize> = HashMap::new();

    for class in classes {
        match by_dir.get(class.path_components()) {
            Some(&index) => packages[index].classes.push(class),
            None => {
                let dir = class.path_components().to_vec();
                by_dir.insert(dir.clone(), packages.len());
                packages.push(PackageCoverage::new(dir, vec![class]));
            }
        }
    }
    packages
}

/// Ensure the list starts with the root, followed by the ancestors of the
/// first package.
fn pad_root(flat: &mut Vec<PackageCoverage>) {
    let first_dir = match flat.first() {
        Some(first) if first.is_root() => return,
        Some(first) => first.path_components.clone(),
        None => {
            flat.push(PackageCoverage::root());
            return;
        }
    };

    let mut padded: Vec<PackageCoverage> = (0..first_dir.len())
        .map(|depth| PackageCoverage::new(first_dir[..depth].to_vec(), Vec::new()))
        .collect();
    padded.append(flat);
    *flat = padded;
}
