/// Selected position in a wrapping sequence of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideNavigator {
    count: usize,
    current: usize,
}

impl SlideNavigator {
    /// Starts on the first slide. There is nothing to navigate without slides.
    pub fn new(count: usize) -> Option<Self> {
        (count > 0).then_some(Self { count, current: 0 })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Index `delta` slides away from the current one, wrapping in both
    /// directions for any magnitude of `delta`.
    pub fn target(&self, delta: i64) -> usize {
        let n = self.count as i64;
        let offset = delta.rem_euclid(n);
        ((self.current as i64 + offset) % n) as usize
    }

    /// Moves the selection by `delta` and returns `(old, new)`, or `None` when the
    /// move lands back on the current slide.
    pub fn select_next(&mut self, delta: i64) -> Option<(usize, usize)> {
        let old = self.current;
        let new = self.target(delta);
        if new == old {
            return None;
        }
        self.current = new;
        Some((old, new))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every navigation lands inside the sequence
        #[test]
        fn target_in_range(n in 1usize..64, start in any::<i64>(), delta in any::<i64>()) {
            let mut nav = SlideNavigator::new(n).unwrap();
            nav.select_next(start);
            prop_assert!(nav.target(delta) < n);
        }

        /// Two moves compose into one move by the summed delta
        #[test]
        fn moves_compose(n in 1usize..64, d1 in -1000i64..1000, d2 in -1000i64..1000) {
            let mut twice = SlideNavigator::new(n).unwrap();
            twice.select_next(d1);
            twice.select_next(d2);

            let mut once = SlideNavigator::new(n).unwrap();
            once.select_next(d1 + d2);

            prop_assert_eq!(twice.current(), once.current());
        }

        /// A move landing on the current slide changes nothing
        #[test]
        fn no_op_leaves_state(n in 1usize..64, start in -100i64..100, k in -10i64..10) {
            let mut nav = SlideNavigator::new(n).unwrap();
            nav.select_next(start);
            let before = nav;
            prop_assert_eq!(nav.select_next(k * n as i64), None);
            prop_assert_eq!(nav, before);
        }
    }
}
