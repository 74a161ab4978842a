use super::*;

fn clock(remaining_ms: i64, increment_ms: i64) -> SideClock {
    SideClock {
        remaining_ms,
        increment_ms,
    }
}

#[test]
fn test_fixed_allotment_is_converted_to_millis() {
    assert_eq!(TimeLimit::fixed(Duration::from_secs(3)).as_millis(), 3_000);
    assert_eq!(TimeLimit::fixed(Duration::from_millis(1_500)).as_millis(), 1_500);
}

#[test]
fn test_fixed_allotment_is_not_floored() {
    assert_eq!(TimeLimit::fixed(Duration::from_millis(50)).as_millis(), 50);
}

#[test]
fn test_clock_formula() {
    // 60s on the clock, 2s increment: 600 + 2000 - 300
    assert_eq!(TimeLimit::from_clock(&clock(60_000, 2_000)).as_millis(), 2_300);
    // 3 minutes, no increment: 1800 - 300
    assert_eq!(TimeLimit::from_clock(&clock(180_000, 0)).as_millis(), 1_500);
}

#[test]
fn test_clock_truncates_like_whole_units() {
    // 12.345s -> 123 (not 123.45); 1.9s increment -> 1s
    assert_eq!(TimeLimit::from_clock(&clock(12_345, 1_900)).as_millis(), 823);
}

#[test]
fn test_clock_floor() {
    assert_eq!(TimeLimit::from_clock(&clock(0, 0)).as_millis(), 96);
    assert_eq!(TimeLimit::from_clock(&clock(30_000, 0)).as_millis(), 96);
    assert_eq!(TimeLimit::from_clock(&clock(-5_000, -1_000)).as_millis(), 96);
    assert_eq!(TimeLimit::from_clock(&clock(i64::MIN, i64::MIN)).as_millis(), 96);
}

#[test]
fn test_budget_reads_side_to_move() {
    let budget = TimeBudget::clock(clock(100_000, 0), clock(300_000, 1_000));

    assert_eq!(TimeLimit::for_budget(&budget, Color::White).as_millis(), 700);
    assert_eq!(TimeLimit::for_budget(&budget, Color::Black).as_millis(), 3_700);
}

#[test]
fn test_display_is_bare_integer() {
    assert_eq!(TimeLimit::fixed(Duration::from_secs(2)).to_string(), "2000");
}
