use std::cell::RefCell;
use std::rc::Rc;

use crate::audio::analyzer::FrequencyAnalyzer;

/// Analyzer shared between the component that feeds it and the handle that reads it.
pub type SharedAnalyzer = Rc<RefCell<dyn FrequencyAnalyzer>>;

#[derive(Default)]
struct AudioBus {
    playing: bool,
    analyzer: Option<SharedAnalyzer>,
}

/// Shared view of the playback state and the current analyzer.
///
/// Cloning yields another reference to the same state. The playback owner flips `playing` and
/// swaps analyzers; the compositor re-reads both on every frame, so changes show up on the next
/// drawn frame.
#[derive(Clone, Default)]
pub struct AudioHandle {
    inner: Rc<RefCell<AudioBus>>,
}

impl std::fmt::Debug for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioHandle")
            .field("playing", &self.is_playing())
            .field("has_analyzer", &self.has_analyzer())
            .finish()
    }
}

impl AudioHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.inner.borrow().playing
    }

    pub fn set_playing(&self, playing: bool) {
        self.inner.borrow_mut().playing = playing;
    }

    /// Replace the current analyzer, if any.
    pub fn set_analyzer(&self, analyzer: SharedAnalyzer) {
        self.inner.borrow_mut().analyzer = Some(analyzer);
    }

    pub fn clear_analyzer(&self) {
        self.inner.borrow_mut().analyzer = None;
    }

    pub fn has_analyzer(&self) -> bool {
        self.inner.borrow().analyzer.is_some()
    }

    /// Take a byte spectrum snapshot into `out` when audio is live.
    ///
    /// Returns `false` (leaving `out` untouched) when nothing is playing, no analyzer is set,
    /// or the analyzer is currently borrowed by its producer.
    pub fn sample_into(&self, out: &mut Vec<u8>) -> bool {
        let analyzer = {
            let bus = self.inner.borrow();
            if !bus.playing {
                return false;
            }
            match &bus.analyzer {
                Some(a) => Rc::clone(a),
                None => return false,
            }
        };
        let Ok(mut analyzer) = analyzer.try_borrow_mut() else {
            tracing::debug!("analyzer busy; skipping spectrum snapshot");
            return false;
        };
        out.resize(analyzer.frequency_bin_count(), 0);
        analyzer.byte_frequency_data(out);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/handle.rs"]
mod tests;
