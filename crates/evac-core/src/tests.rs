//! Unit tests for evac-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, EdgeId, NodeId, PlanId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(PlanId(0) < PlanId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "a7");
        assert_eq!(NodeId(3).to_string(), "n3");
        assert_eq!(PlanId::INVALID.to_string(), "p?");
    }

    #[test]
    fn validity() {
        assert!(EdgeId(0).is_valid());
        assert!(!EdgeId::default().is_valid());
        assert!(NodeId::try_from(u32::MAX as usize + 1).is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn never_saturates() {
        assert_eq!(Tick::NEVER + 7, Tick::NEVER);
        assert!(Tick(u64::MAX - 1) < Tick::NEVER);
        assert!(Tick::NEVER.is_never());
    }

    #[test]
    fn since_is_clamped() {
        assert_eq!(Tick(3).since(Tick(5)), 0);
    }

    #[test]
    fn display() {
        assert_eq!(Tick(4).to_string(), "T4");
        assert_eq!(Tick::NEVER.to_string(), "T∞");
    }
}

#[cfg(test)]
mod config {
    use crate::EvacConfig;

    #[test]
    fn defaults_match_reference_values() {
        let c = EvacConfig::default();
        assert_eq!(c.base_penalty, 2);
        assert_eq!(c.vandal_no_ops, 1);
        assert_eq!(c.expansion_time_unit, 0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_realtime_limit_rejected() {
        let c = EvacConfig { realtime_limit: 0, ..EvacConfig::default() };
        assert!(c.validate().is_err());
    }
}
