use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Client-count sweep of the 50% multi-home TPC-C experiment
pub const DEFAULT_RUNS: &[&str] = &[
    "tpcc_mh_0_t64_c1",
    "tpcc_mh_0_t64_c2",
    "tpcc_mh_0_t64_c4",
    "tpcc_mh_0_t64_c8",
    "tpcc_mh_0_t64_c16",
    "tpcc_mh_0_t64_c32",
    "tpcc_mh_0_t64_c64",
    "tpcc_mh_0_t64_c128",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDir {
    pub name: String,
    pub path: PathBuf,
}

/// Joins every run name onto `data_path`, keeping the given order.
/// Directories are not checked for existence here.
pub fn run_dirs<S: AsRef<str>>(data_path: &Path, names: &[S]) -> Vec<RunDir> {
    names
        .iter()
        .map(|name| RunDir {
            name: name.as_ref().to_owned(),
            path: data_path.join(name.as_ref()),
        })
        .collect()
}

/// Accepts run directories by name. The first capture group, when present,
/// is the client count encoded in the name.
#[derive(Debug, Clone)]
pub struct RunFilter {
    re: Regex,
}

impl RunFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern).context(format!("Compile run filter {pattern}"))?;
        Ok(Self { re })
    }

    pub fn accepts(&self, run: &RunDir) -> bool {
        self.re.is_match(&run.name)
    }

    pub fn client_suffix(&self, run: &RunDir) -> Option<u64> {
        self.re
            .captures(&run.name)?
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> RunFilter {
        RunFilter::new(r"_c(\d+)$").unwrap()
    }

    #[test]
    fn default_runs_keep_order() {
        let runs = run_dirs(Path::new("/work/data"), DEFAULT_RUNS);
        assert_eq!(runs.len(), 8);
        assert_eq!(runs[0].path, PathBuf::from("/work/data/tpcc_mh_0_t64_c1"));
        assert_eq!(runs[7].name, "tpcc_mh_0_t64_c128");

        let filter = filter();
        let suffixes = runs
            .iter()
            .map(|run| filter.client_suffix(run))
            .collect::<Option<Vec<_>>>()
            .unwrap();
        assert_eq!(suffixes, vec![1, 2, 4, 8, 16, 32, 64, 128]);
    }

    #[test]
    fn filter_requires_trailing_client_count() {
        let filter = filter();
        let runs = run_dirs(
            Path::new("data"),
            &["tpcc_c4", "tpcc_c4_retry", "common_dir", "tpcc_c"],
        );
        let accepted = runs
            .iter()
            .map(|run| filter.accepts(run))
            .collect::<Vec<_>>();
        assert_eq!(accepted, vec![true, false, false, false]);
        assert_eq!(filter.client_suffix(&runs[1]), None);
    }

    #[test]
    fn pattern_without_group_has_no_suffix() {
        let filter = RunFilter::new("^tpcc_").unwrap();
        let run = &run_dirs(Path::new("data"), &["tpcc_c4"])[0];
        assert!(filter.accepts(run));
        assert_eq!(filter.client_suffix(run), None);
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(RunFilter::new("_c(").is_err());
    }
}
