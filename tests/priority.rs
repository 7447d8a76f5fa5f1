use procprio::{Error, NICE_MAX, NICE_MIN, get_current_priority, nice, set_niceness};
use serial_test::serial;

#[test]
#[serial]
fn test_set_niceness_by_one() {
    assert!(set_niceness(1).is_ok());
}

#[test]
#[serial]
fn test_get_current_priority_is_numeric() {
    let priority: i32 = get_current_priority().unwrap();
    assert!((NICE_MIN..=NICE_MAX).contains(&priority));
}

#[test]
#[serial]
fn test_zero_adjustment_keeps_priority() {
    let before = get_current_priority().unwrap();
    set_niceness(0).unwrap();
    assert_eq!(get_current_priority().unwrap(), before);
}

#[test]
#[serial]
fn test_repeated_reads_agree() {
    assert_eq!(get_current_priority().unwrap(), get_current_priority().unwrap());
}

#[test]
#[serial]
fn test_unprivileged_adjustments_succeed() {
    // Raising niceness never needs privilege, even once clamped at the top
    for delta in 0..=NICE_MAX {
        let before = get_current_priority().unwrap();
        let after = nice(Some(delta)).unwrap();
        assert!(after >= before, "delta {} moved {} to {}", delta, before, after);
    }
}

#[test]
#[serial]
fn test_out_of_range_delta_is_invalid() {
    for delta in [NICE_MAX + 1, NICE_MIN - 1] {
        let before = get_current_priority().unwrap();
        let err = set_niceness(delta).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert_eq!(get_current_priority().unwrap(), before);
    }
}

#[cfg(unix)]
#[test]
#[serial]
fn test_raising_priority_matches_floor() {
    let floor = procprio::lowest_permitted_niceness().unwrap();
    let current = get_current_priority().unwrap();

    if floor < current {
        set_niceness(-1).unwrap();
        assert_eq!(get_current_priority().unwrap(), current - 1);
        set_niceness(1).unwrap();
        assert_eq!(get_current_priority().unwrap(), current);
    } else if current > NICE_MIN {
        let err = set_niceness(-1).unwrap_err();
        assert!(err.is_permission_denied(), "unexpected error: {:?}", err);
        assert_eq!(get_current_priority().unwrap(), current);
    } else {
        // Already at the top, the kernel clamps instead of refusing
        assert_eq!(floor, NICE_MIN);
        set_niceness(-1).unwrap();
        assert_eq!(get_current_priority().unwrap(), NICE_MIN);
    }
}
