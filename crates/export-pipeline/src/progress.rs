use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// User-facing status of a running export, derived from its percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportPhase {
    GeneratingGeometry,
    ApplyingMaterials,
    GeneratingTextures,
    OptimizingMesh,
    Finalizing,
}

impl ExportPhase {
    /// Five equal bands: 0-19, 20-39, 40-59, 60-79, 80-100.
    pub fn for_percent(percent: u8) -> ExportPhase {
        match percent {
            0..=19 => ExportPhase::GeneratingGeometry,
            20..=39 => ExportPhase::ApplyingMaterials,
            40..=59 => ExportPhase::GeneratingTextures,
            60..=79 => ExportPhase::OptimizingMesh,
            _ => ExportPhase::Finalizing,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ExportPhase::GeneratingGeometry => "Generating geometry...",
            ExportPhase::ApplyingMaterials => "Applying materials...",
            ExportPhase::GeneratingTextures => "Generating textures...",
            ExportPhase::OptimizingMesh => "Optimizing mesh...",
            ExportPhase::Finalizing => "Finalizing export...",
        }
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportPhase::GeneratingGeometry => "generating geometry",
            ExportPhase::ApplyingMaterials => "applying materials",
            ExportPhase::GeneratingTextures => "generating textures",
            ExportPhase::OptimizingMesh => "optimizing mesh",
            ExportPhase::Finalizing => "finalizing",
        })
    }
}

/// One progress checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportProgress {
    pub phase: ExportPhase,
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
    pub message: String,
}

impl ExportProgress {
    pub fn at(completed: usize, total: usize, detail: Option<&str>) -> Self {
        let percent = if total == 0 {
            100
        } else {
            ((completed.min(total) * 100) / total) as u8
        };
        let phase = ExportPhase::for_percent(percent);
        let message = match detail {
            Some(detail) => format!("{} ({})", phase.status(), detail),
            None => phase.status().to_string(),
        };
        Self {
            phase,
            completed,
            total,
            percent,
            message,
        }
    }
}

/// Receives progress checkpoints.
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: &ExportProgress);
}

impl<F: FnMut(&ExportProgress)> ProgressObserver for F {
    fn on_progress(&mut self, progress: &ExportProgress) {
        self(progress)
    }
}

/// Observer that drops every update.
pub struct IgnoreProgress;

impl ProgressObserver for IgnoreProgress {
    fn on_progress(&mut self, _progress: &ExportProgress) {}
}

/// Shared flag checked between export checkpoints.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands() {
        assert_eq!(ExportPhase::for_percent(0), ExportPhase::GeneratingGeometry);
        assert_eq!(ExportPhase::for_percent(20), ExportPhase::ApplyingMaterials);
        assert_eq!(ExportPhase::for_percent(59), ExportPhase::GeneratingTextures);
        assert_eq!(ExportPhase::for_percent(79), ExportPhase::OptimizingMesh);
        assert_eq!(ExportPhase::for_percent(100), ExportPhase::Finalizing);
    }

    #[test]
    fn percent_from_units() {
        let p = ExportProgress::at(3, 6, Some("obj"));
        assert_eq!(p.percent, 50);
        assert_eq!(p.phase, ExportPhase::GeneratingTextures);
        assert_eq!(p.message, "Generating textures... (obj)");
        assert_eq!(ExportProgress::at(0, 0, None).percent, 100);
    }

    #[test]
    fn token_clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
