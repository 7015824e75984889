//! Index newtypes for agents, road-network elements, and search plans.
//!
//! Every id is a dense `u32` index into the `Vec` that owns the thing it
//! names: `Graph` for nodes and edges, `Sim` for agents, and the planner's
//! `PlanArena` for plans.  Ids are `Ord`, so they sit in `BTreeSet`s (node
//! occupancy, the evacuation set) and act as the last tie-breaker wherever a
//! deterministic order is needed (Dijkstra's heap, the search frontier).
//!
//! `Display` prints a one-letter tag and the index (`n3`, `e0`, `a1`, `p12`)
//! so traces stay short.

use std::fmt;

macro_rules! index_id {
    ($(#[$attr:meta])* $name:ident, $tag:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Placeholder for "not placed / not set".  Never a valid index.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            /// Fails for indices that don't fit in `u32`.
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($tag, "{}"), self.0)
                } else {
                    f.write_str(concat!($tag, "?"))
                }
            }
        }
    };
}

index_id! {
    /// Position of an agent in `Sim::agents`, assigned in placement order.
    AgentId, "a"
}

index_id! {
    /// A town, junction, or shelter.  Scenario files number vertices from 1;
    /// `NodeId`s start at 0 in declaration order.
    NodeId, "n"
}

index_id! {
    /// An undirected road.  Both directions share one id.
    EdgeId, "e"
}

index_id! {
    /// A plan in the search arena.  Allocated in creation order, so a lower id
    /// is an older plan; the frontier uses that as its final tie-breaker.
    PlanId, "p"
}
