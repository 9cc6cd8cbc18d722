use super::*;

// ============================================================================
// 2D slots
// ============================================================================

#[test]
fn test_alloc_2d_is_contiguous() {
    let mut slots = ShadowSlotAllocator::new(8, 0);

    assert_eq!(slots.alloc_2d(3), Some(0));
    assert_eq!(slots.alloc_2d(1), Some(3));
    assert_eq!(slots.alloc_2d(4), Some(4));
    assert_eq!(slots.used_2d(), 8);
}

#[test]
fn test_alloc_2d_is_all_or_nothing() {
    let mut slots = ShadowSlotAllocator::new(4, 0);

    assert_eq!(slots.alloc_2d(3), Some(0));
    // 1 slot left, 3 requested: nothing consumed
    assert_eq!(slots.alloc_2d(3), None);
    assert_eq!(slots.used_2d(), 3);
    // The remaining single slot is still allocatable
    assert_eq!(slots.alloc_2d(1), Some(3));
}

#[test]
fn test_alloc_2d_exhaustion() {
    let mut slots = ShadowSlotAllocator::new(2, 0);
    assert_eq!(slots.alloc_2d(1), Some(0));
    assert_eq!(slots.alloc_2d(1), Some(1));
    assert_eq!(slots.alloc_2d(1), None);
}

// ============================================================================
// Cube slots
// ============================================================================

#[test]
fn test_cube_budget_is_independent() {
    let mut slots = ShadowSlotAllocator::new(1, 2);

    assert_eq!(slots.alloc_2d(1), Some(0));
    assert_eq!(slots.alloc_cube(), Some(0));
    assert_eq!(slots.alloc_cube(), Some(1));
    // Cube budget gone; 2D exhaustion doesn't affect it and vice versa
    assert_eq!(slots.alloc_cube(), None);
    assert_eq!(slots.alloc_2d(1), None);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_restores_both_budgets() {
    let mut slots = ShadowSlotAllocator::new(2, 1);
    slots.alloc_2d(2);
    slots.alloc_cube();

    slots.reset();
    assert_eq!(slots.used_2d(), 0);
    assert_eq!(slots.used_cube(), 0);
    assert_eq!(slots.alloc_2d(2), Some(0));
    assert_eq!(slots.alloc_cube(), Some(0));
}

#[test]
fn test_zero_budget_allocates_nothing() {
    let mut slots = ShadowSlotAllocator::new(0, 0);
    assert_eq!(slots.alloc_2d(1), None);
    assert_eq!(slots.alloc_cube(), None);
}
