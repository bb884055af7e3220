use std::fs;
use std::path::{Path, PathBuf};

use replplot::PlotConfig;
use tempfile::TempDir;

/// Header the bench command writes.
#[allow(dead_code)]
pub const HEADER: &str =
    "replicationMode,rf,k,threads,putRatio,totalOps,throughputOpsSec,avgMs,p50Ms,p75Ms,p95Ms,p99Ms";

#[allow(dead_code)]
pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

#[allow(dead_code)]
pub fn row(mode: &str, rf: u32, put_ratio: &str, throughput: f64, p95: f64) -> String {
    format!("{mode},{rf},1,8,{put_ratio},20000,{throughput},1.250,0.900,1.400,{p95:.3},6.500")
}

/// Two runs per (mode, rf, putRatio) for sync/async at rf 1..=3, plus
/// semi-sync at rf 3, for both swept put ratios.
#[allow(dead_code)]
pub fn full_sweep_rows() -> Vec<String> {
    let mut rows = Vec::new();
    for ratio in ["0.8", "0.2"] {
        for rf in 1..=3u32 {
            for (mode, base) in [("sync", 900.0), ("async", 1_500.0)] {
                for run in 0..2 {
                    let throughput = base - f64::from(rf) * 100.0 + f64::from(run) * 10.0;
                    rows.push(row(mode, rf, ratio, throughput, 2.0 + f64::from(rf)));
                }
            }
        }
        rows.push(row("semi-sync", 3, ratio, 1_100.0, 3.5));
    }
    rows
}

/// Temp directory holding a results file and the chart output directory.
#[allow(dead_code)]
pub struct TestWorkspace {
    dir: TempDir,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn source_path(&self) -> PathBuf {
        self.dir.path().join("results.csv")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("charts")
    }

    /// Writes `HEADER` followed by `rows` and returns the file path.
    pub fn write_source(&self, rows: &[String]) -> PathBuf {
        let mut contents = String::from(HEADER);
        contents.push('\n');
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        let path = self.source_path();
        fs::write(&path, contents).expect("write results fixture");
        path
    }

    pub fn config(&self) -> PlotConfig {
        PlotConfig::new(self.source_path(), self.out_dir())
    }

    /// Sorted names of the PNG files in the output directory.
    pub fn charts(&self) -> Vec<String> {
        list_pngs(&self.out_dir())
    }
}

#[allow(dead_code)]
pub fn list_pngs(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect();
    names.sort();
    names
}
