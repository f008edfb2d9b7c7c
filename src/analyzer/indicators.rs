// Streams daily bars through the indicator set and tracks the last emitted
// values. Derived metrics (%B, SMA deviations, volume ratio) carry the same
// zero-division guards as the report definitions: a zero-width band or a
// zero average volume yields 0.
use crate::config::AnalysisConfig;
use crate::model::{AnalyzeError, DailyBar};
use ta::Next;
use ta::indicators::{BollingerBands, RelativeStrengthIndex, SimpleMovingAverage};

/// Raw (unrounded) indicator values after the last `update`.
#[derive(Debug, Clone, Copy)]
pub struct LatestIndicators {
    pub close: f64,
    pub change_pct: f64,
    pub diff_short: f64,
    pub diff_mid: f64,
    pub diff_long: f64,
    pub rsi: f64,
    pub pct_b: f64,
    pub volume_ratio: f64,
}

pub struct IndicatorEngine {
    rsi: RelativeStrengthIndex,
    bollinger: BollingerBands,
    sma_short: SimpleMovingAverage,
    sma_mid: SimpleMovingAverage,
    sma_long: SimpleMovingAverage,
    volume_sma: SimpleMovingAverage,
    min_bars: usize,
    bars_seen: usize,
    prev_close: Option<f64>,
    latest: Option<LatestIndicators>,
}

impl IndicatorEngine {
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalyzeError> {
        Ok(Self {
            rsi: RelativeStrengthIndex::new(config.rsi_period)
                .ok()
                .ok_or(AnalyzeError::InvalidPeriod("rsi_period"))?,
            bollinger: BollingerBands::new(config.bollinger_period, config.bollinger_width)
                .ok()
                .ok_or(AnalyzeError::InvalidPeriod("bollinger_period"))?,
            sma_short: SimpleMovingAverage::new(config.sma_short_period)
                .ok()
                .ok_or(AnalyzeError::InvalidPeriod("sma_short_period"))?,
            sma_mid: SimpleMovingAverage::new(config.sma_mid_period)
                .ok()
                .ok_or(AnalyzeError::InvalidPeriod("sma_mid_period"))?,
            sma_long: SimpleMovingAverage::new(config.sma_long_period)
                .ok()
                .ok_or(AnalyzeError::InvalidPeriod("sma_long_period"))?,
            volume_sma: SimpleMovingAverage::new(config.volume_sma_period)
                .ok()
                .ok_or(AnalyzeError::InvalidPeriod("volume_sma_period"))?,
            min_bars: config.min_bars(),
            bars_seen: 0,
            prev_close: None,
            latest: None,
        })
    }

    pub fn update(&mut self, bar: &DailyBar) {
        let close = bar.close;

        let change_pct = match self.prev_close {
            Some(prev) if prev != 0.0 => (close - prev) / prev * 100.0,
            _ => 0.0,
        };

        let bands = self.bollinger.next(close);
        let band_width = bands.upper - bands.lower;
        let pct_b = if band_width == 0.0 {
            0.0
        } else {
            (close - bands.lower) / band_width
        };

        let volume = bar.volume as f64;
        let volume_avg = self.volume_sma.next(volume);
        let volume_ratio = if volume_avg == 0.0 {
            0.0
        } else {
            volume / volume_avg
        };

        let rsi = self.rsi.next(close);
        // flat series has no momentum signal
        let rsi = if rsi.is_finite() { rsi } else { 50.0 };

        let diff_short = deviation_pct(close, self.sma_short.next(close));
        let diff_mid = deviation_pct(close, self.sma_mid.next(close));
        let diff_long = deviation_pct(close, self.sma_long.next(close));

        self.prev_close = Some(close);
        self.bars_seen += 1;
        self.latest = Some(LatestIndicators {
            close,
            change_pct,
            diff_short,
            diff_mid,
            diff_long,
            rsi,
            pct_b,
            volume_ratio,
        });
    }

    /// Last values, available once every window has filled.
    pub fn latest(&self) -> Option<LatestIndicators> {
        if self.bars_seen >= self.min_bars {
            self.latest
        } else {
            None
        }
    }
}

fn deviation_pct(close: f64, sma: f64) -> f64 {
    if sma == 0.0 {
        0.0
    } else {
        (close - sma) / sma * 100.0
    }
}
