//! Unit tests for evac-schedule.

#[cfg(test)]
mod task_queue {
    use evac_core::Tick;

    use crate::TaskQueue;

    #[test]
    fn push_and_drain() {
        let mut q = TaskQueue::new();
        q.push(Tick(5), 'a');
        q.push(Tick(5), 'b');
        q.push(Tick(10), 'c');

        assert_eq!(q.len(), 3);
        assert_eq!(q.tick_count(), 2);

        let tasks = q.drain_tick(Tick(5)).unwrap();
        assert_eq!(tasks, vec!['a', 'b']);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn drain_keeps_registration_order() {
        let mut q = TaskQueue::new();
        for i in 0..10u32 {
            q.push(Tick(3), i);
        }
        assert_eq!(q.drain_tick(Tick(3)).unwrap(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn drain_empty_tick_returns_none() {
        let mut q: TaskQueue<u8> = TaskQueue::new();
        assert!(q.drain_tick(Tick(99)).is_none());
    }

    #[test]
    fn next_tick_is_earliest() {
        let mut q = TaskQueue::new();
        q.push(Tick(20), ());
        q.push(Tick(5), ());
        q.push(Tick(15), ());
        assert_eq!(q.next_tick(), Some(Tick(5)));
    }

    #[test]
    fn is_empty_after_all_drained() {
        let mut q = TaskQueue::new();
        q.push(Tick(1), 1);
        q.drain_tick(Tick(1));
        assert!(q.is_empty());
        assert_eq!(q.next_tick(), None);
    }

    #[test]
    fn drain_through_takes_overdue_ticks() {
        let mut q = TaskQueue::new();
        q.push(Tick(2), "late");
        q.push(Tick(1), "early");
        q.push(Tick(4), "future");
        q.push(Tick(2), "late-2");

        assert_eq!(q.drain_through(Tick(3)), vec!["early", "late", "late-2"]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(4)));
    }

    #[test]
    fn drain_through_never_takes_everything() {
        let mut q = TaskQueue::new();
        q.push(Tick(0), 0);
        q.push(Tick::NEVER, 1);
        assert_eq!(q.drain_through(Tick::NEVER), vec![0, 1]);
        assert!(q.is_empty());
    }

    #[test]
    fn clear_resets_count() {
        let mut q = TaskQueue::new();
        q.push(Tick(1), 1);
        q.push(Tick(2), 2);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.tick_count(), 0);
    }
}
