use super::*;

struct Constant {
    bins: usize,
    value: u8,
    reads: usize,
}

impl FrequencyAnalyzer for Constant {
    fn frequency_bin_count(&self) -> usize {
        self.bins
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        self.reads += 1;
        out.iter_mut().take(self.bins).for_each(|b| *b = self.value);
    }
}

fn constant(bins: usize, value: u8) -> Rc<RefCell<Constant>> {
    Rc::new(RefCell::new(Constant {
        bins,
        value,
        reads: 0,
    }))
}

#[test]
fn paused_or_missing_analyzer_yields_nothing() {
    let handle = AudioHandle::new();
    let mut out = vec![9u8; 3];
    assert!(!handle.sample_into(&mut out));

    handle.set_playing(true);
    assert!(!handle.sample_into(&mut out));

    let analyzer = constant(4, 200);
    handle.set_analyzer(analyzer.clone());
    handle.set_playing(false);
    assert!(!handle.sample_into(&mut out));
    assert_eq!(out, vec![9, 9, 9]);
    assert_eq!(analyzer.borrow().reads, 0);
}

#[test]
fn live_audio_fills_one_entry_per_bin() {
    let handle = AudioHandle::new();
    let analyzer = constant(4, 200);
    handle.set_analyzer(analyzer.clone());
    handle.set_playing(true);

    let mut out = Vec::new();
    assert!(handle.sample_into(&mut out));
    assert_eq!(out, vec![200; 4]);
    assert_eq!(analyzer.borrow().reads, 1);
}

#[test]
fn clones_share_state_and_analyzers_can_be_swapped() {
    let handle = AudioHandle::new();
    let view = handle.clone();

    handle.set_analyzer(constant(2, 10));
    handle.set_playing(true);
    assert!(view.is_playing());
    assert!(view.has_analyzer());

    handle.set_analyzer(constant(2, 99));
    let mut out = Vec::new();
    assert!(view.sample_into(&mut out));
    assert_eq!(out, vec![99, 99]);

    handle.clear_analyzer();
    assert!(!view.has_analyzer());
    assert!(!view.sample_into(&mut out));
}

#[test]
fn busy_analyzer_is_skipped() {
    let handle = AudioHandle::new();
    let analyzer = constant(2, 10);
    handle.set_analyzer(analyzer.clone());
    handle.set_playing(true);

    let _held = analyzer.borrow_mut();
    let mut out = Vec::new();
    assert!(!handle.sample_into(&mut out));
}
