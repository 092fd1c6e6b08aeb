// src/timer.rs

use chrono::{DateTime, Duration, Utc};

/// Resultado de un tick de la cuenta atrás.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Running,
    /// Se agotó en este tick. Solo se devuelve una vez.
    Expired,
    Stopped,
}

/// Cuenta atrás en segundos enteros, una por intento.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: i64,
    stopped: bool,
}

impl Countdown {
    pub fn new(limit_seconds: u32) -> Self {
        Self {
            remaining: i64::from(limit_seconds),
            stopped: false,
        }
    }

    /// Resta un segundo. Al pasar a negativo se detiene y avisa de la expiración.
    pub fn tick(&mut self) -> Tick {
        if self.stopped {
            return Tick::Stopped;
        }
        self.remaining -= 1;
        if self.remaining < 0 {
            self.stopped = true;
            Tick::Expired
        } else {
            Tick::Running
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn remaining_seconds(&self) -> u32 {
        u32::try_from(self.remaining.max(0)).unwrap_or(u32::MAX)
    }

    /// Texto "mm:ss" para el marcador.
    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_seconds())
    }
}

/// "mm:ss" con ceros a la izquierda; los minutos pueden pasar de 99.
pub fn format_mm_ss(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Convierte tiempo de reloj en ticks de segundo entero sin acumular deriva.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickClock {
    anchor: DateTime<Utc>,
}

impl TickClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { anchor: now }
    }

    /// Segundos enteros vencidos desde el último avance; el resto se conserva.
    pub fn advance(&mut self, now: DateTime<Utc>) -> u32 {
        let due = (now - self.anchor).num_seconds().max(0);
        self.anchor += Duration::seconds(due);
        u32::try_from(due).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, "00:00")]
    #[case(59, "00:59")]
    #[case(61, "01:01")]
    #[case(3600, "60:00")]
    #[case(6000, "100:00")]
    fn formats_minutes_and_seconds(#[case] secs: u32, #[case] expected: &str) {
        assert_eq!(format_mm_ss(secs), expected);
    }

    #[test]
    fn expires_exactly_once_and_never_early() {
        let limit = 5;
        let mut countdown = Countdown::new(limit);
        let mut expirations = Vec::new();
        for tick_no in 1..=20u32 {
            if countdown.tick() == Tick::Expired {
                expirations.push(tick_no);
            }
        }
        assert_eq!(expirations.len(), 1);
        assert!(expirations[0] >= limit);
        assert!(countdown.is_stopped());
        assert_eq!(countdown.display(), "00:00");
    }

    #[test]
    fn stop_prevents_expiry() {
        let mut countdown = Countdown::new(1);
        countdown.stop();
        for _ in 0..5 {
            assert_eq!(countdown.tick(), Tick::Stopped);
        }
        assert_eq!(countdown.remaining_seconds(), 1);
    }

    #[test]
    fn tick_clock_keeps_fractions() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut clock = TickClock::new(t0);
        assert_eq!(clock.advance(t0 + Duration::milliseconds(900)), 0);
        assert_eq!(clock.advance(t0 + Duration::milliseconds(1_100)), 1);
        assert_eq!(clock.advance(t0 + Duration::milliseconds(1_950)), 0);
        assert_eq!(clock.advance(t0 + Duration::milliseconds(4_000)), 3);
        // el reloj hacia atrás no produce ticks
        assert_eq!(clock.advance(t0), 0);
    }

    #[test]
    fn display_counts_down() {
        let mut countdown = Countdown::new(61);
        assert_eq!(countdown.display(), "01:01");
        countdown.tick();
        assert_eq!(countdown.display(), "01:00");
    }
}
