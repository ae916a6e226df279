// src/structure/swings.rs
use crate::types::{Candle, Swing, SwingSide};

/// Symmetric-window swing finder.
///
/// A candle is a swing high when its high is strictly above the highs of the
/// `window` candles on each side; swing lows mirror this on the lows. Equal
/// neighbours (plateaus) never qualify.
#[derive(Debug, Clone, Copy)]
pub struct SwingDetector {
    pub window: usize,
}

impl Default for SwingDetector {
    fn default() -> Self {
        Self { window: 5 }
    }
}

impl SwingDetector {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn detect(&self, candles: &[Candle]) -> (Vec<Swing>, Vec<Swing>) {
        find_swings(candles, self.window)
    }
}

/// Returns `(highs, lows)` in time order. Fewer than `2n + 1` candles (or
/// `n == 0`) gives two empty vectors.
pub fn find_swings(candles: &[Candle], n: usize) -> (Vec<Swing>, Vec<Swing>) {
    let mut highs = Vec::new();
    let mut lows = Vec::new();

    if n == 0 || candles.len() < 2 * n + 1 {
        return (highs, lows);
    }

    for i in n..candles.len() - n {
        let current = &candles[i];

        if all_neighbours(candles, i, n, |other| current.high > other.high) {
            highs.push(Swing {
                time: current.time,
                price: current.high,
                side: SwingSide::High,
            });
        }

        if all_neighbours(candles, i, n, |other| current.low < other.low) {
            lows.push(Swing {
                time: current.time,
                price: current.low,
                side: SwingSide::Low,
            });
        }
    }

    (highs, lows)
}

fn all_neighbours<F>(candles: &[Candle], i: usize, n: usize, check: F) -> bool
where
    F: Fn(&Candle) -> bool,
{
    (1..=n).all(|j| check(&candles[i - j]) && check(&candles[i + j]))
}
