/// Behaviour shared by every hunter on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Scatter,
    Chase,
    Frightened,
}

/// Repeating scatter/chase window: the first `scatter_ticks` of every
/// `period` ticks are Scatter, the rest Chase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub scatter_ticks: u64,
    pub period: u64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            scatter_ticks: 70,
            period: 270,
        }
    }
}

impl Mode {
    /// Derives the mode from the tick counter and the frighten timer alone.
    pub fn at(tick: u64, frighten_timer: u32, schedule: &Schedule) -> Mode {
        if frighten_timer > 0 {
            return Mode::Frightened;
        }
        if schedule.period == 0 || tick % schedule.period < schedule.scatter_ticks {
            Mode::Scatter
        } else {
            Mode::Chase
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_then_chase_each_period() {
        let schedule = Schedule {
            scatter_ticks: 5,
            period: 12,
        };
        for tick in 1..5 {
            assert_eq!(Mode::at(tick, 0, &schedule), Mode::Scatter);
        }
        for tick in 5..12 {
            assert_eq!(Mode::at(tick, 0, &schedule), Mode::Chase);
        }
        assert_eq!(Mode::at(12, 0, &schedule), Mode::Scatter);
        assert_eq!(Mode::at(17, 0, &schedule), Mode::Chase);
    }

    #[test]
    fn frightened_overrides_schedule() {
        let schedule = Schedule::default();
        assert_eq!(Mode::at(1, 3, &schedule), Mode::Frightened);
        assert_eq!(Mode::at(100, 1, &schedule), Mode::Frightened);
        assert_eq!(Mode::at(100, 0, &schedule), Mode::Chase);
    }
}
