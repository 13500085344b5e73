//! Score types shared by the label and evaluation stages.

use serde::{Deserialize, Serialize};

/// F1, precision and recall of one ROUGE variant, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RougeScore {
    pub f: f64,
    pub p: f64,
    pub r: f64,
}

/// ROUGE-1, ROUGE-2 and ROUGE-L for one candidate/reference comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreDict {
    #[serde(rename = "rouge-1")]
    pub rouge_1: RougeScore,
    #[serde(rename = "rouge-2")]
    pub rouge_2: RougeScore,
    #[serde(rename = "rouge-l")]
    pub rouge_l: RougeScore,
}

impl ScoreDict {
    /// All-zero scores, used for degenerate candidates and ROUGE failures.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Metrics in report order with their conventional names.
    pub fn metrics(&self) -> [(&'static str, RougeScore); 3] {
        [
            ("rouge-1", self.rouge_1),
            ("rouge-2", self.rouge_2),
            ("rouge-l", self.rouge_l),
        ]
    }
}

/// Leaf-wise arithmetic mean of score dicts. `None` for an empty slice.
pub fn compute_avg_dict(dicts: &[ScoreDict]) -> Option<ScoreDict> {
    if dicts.is_empty() {
        return None;
    }
    let n = dicts.len() as f64;
    let mean = |pick: fn(&ScoreDict) -> RougeScore| RougeScore {
        f: dicts.iter().map(|d| pick(d).f).sum::<f64>() / n,
        p: dicts.iter().map(|d| pick(d).p).sum::<f64>() / n,
        r: dicts.iter().map(|d| pick(d).r).sum::<f64>() / n,
    };
    Some(ScoreDict {
        rouge_1: mean(|d| d.rouge_1),
        rouge_2: mean(|d| d.rouge_2),
        rouge_l: mean(|d| d.rouge_l),
    })
}
