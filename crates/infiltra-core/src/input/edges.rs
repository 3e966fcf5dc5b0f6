use super::RawButtons;

/// Rising edges observed during one tick.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Edges {
    pub a: bool,
    pub b: bool,
    pub c: bool,
    pub escape: bool,
}

/// Double-buffered levels that turn held buttons into one-tick press edges.
///
/// Per tick: `sample` once, read `edges` any number of times, `finalize` once.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeDetector {
    curr: RawButtons,
    last: RawButtons,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self {
            curr: RawButtons::RELEASED,
            last: RawButtons::RELEASED,
        }
    }

    pub fn sample(&mut self, raw: RawButtons) {
        self.curr = raw;
    }

    pub const fn edges(&self) -> Edges {
        Edges {
            a: self.curr.a && !self.last.a,
            b: self.curr.b && !self.last.b,
            c: self.curr.c && !self.last.c,
            escape: self.curr.escape && !self.last.escape,
        }
    }

    pub fn finalize(&mut self) {
        self.last = self.curr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(a: bool, b: bool, c: bool) -> RawButtons {
        RawButtons {
            a,
            b,
            c,
            escape: false,
        }
    }

    #[test]
    fn press_edge_lasts_exactly_one_tick() {
        let mut detector = EdgeDetector::new();

        detector.sample(held(true, false, false));
        assert!(detector.edges().a);
        detector.finalize();

        detector.sample(held(true, false, false));
        assert!(!detector.edges().a);
        detector.finalize();

        detector.sample(held(false, false, false));
        assert!(!detector.edges().a);
        detector.finalize();

        detector.sample(held(true, false, false));
        assert!(detector.edges().a);
    }

    #[test]
    fn edges_are_stable_until_finalize() {
        let mut detector = EdgeDetector::new();
        detector.sample(held(false, true, true));

        assert_eq!(detector.edges(), detector.edges());
        assert!(detector.edges().b && detector.edges().c);

        detector.finalize();
        assert!(!detector.edges().any());
    }

    #[test]
    fn release_does_not_produce_an_edge() {
        let mut detector = EdgeDetector::new();
        detector.sample(held(false, false, true));
        detector.finalize();
        detector.sample(held(false, false, false));
        assert!(!detector.edges().c);
    }
}
