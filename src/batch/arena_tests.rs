use super::*;
use crate::batch::render_batch::RenderBatch;

fn fill(builder: &mut QueueBuilder<'_>, batches: &[(u32, u32, f32)]) {
    for &(mesh, instance, distance) in batches {
        builder.push(RenderBatch::encode(mesh, instance, distance));
    }
}

#[test]
fn test_queue_ranges_are_contiguous_and_independent() {
    let mut arena = BatchArena::new();

    let mut builder = arena.begin_queue();
    fill(&mut builder, &[(0, 0, 1.0), (0, 1, 2.0)]);
    let first = builder.finish();

    let mut builder = arena.begin_queue();
    fill(&mut builder, &[(1, 0, 3.0)]);
    let second = builder.finish();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
    assert_eq!(arena.batches(first).len(), 2);
    assert_eq!(arena.batches(second)[0].mesh_index(), 1);
}

#[test]
fn test_empty_queue() {
    let mut arena = BatchArena::new();
    let range = arena.begin_queue().finish();
    assert!(range.is_empty());
    assert!(arena.batches(range).is_empty());
}

#[test]
fn test_sort_front_to_back() {
    let mut arena = BatchArena::new();
    let mut builder = arena.begin_queue();
    fill(&mut builder, &[(0, 0, 30.0), (1, 1, 10.0), (2, 2, 20.0)]);
    let range = builder.finish();

    arena.sort(range, SortOrder::FrontToBack);
    let distances: Vec<f32> = arena.batches(range).iter().map(|b| b.distance()).collect();
    assert_eq!(distances, vec![10.0, 20.0, 30.0]);
}

#[test]
fn test_sort_back_to_front() {
    let mut arena = BatchArena::new();
    let mut builder = arena.begin_queue();
    fill(&mut builder, &[(0, 0, 10.0), (1, 1, 30.0), (2, 2, 20.0)]);
    let range = builder.finish();

    arena.sort(range, SortOrder::BackToFront);
    let distances: Vec<f32> = arena.batches(range).iter().map(|b| b.distance()).collect();
    assert_eq!(distances, vec![30.0, 20.0, 10.0]);
}

#[test]
fn test_sort_touches_only_its_range() {
    let mut arena = BatchArena::new();
    let mut builder = arena.begin_queue();
    fill(&mut builder, &[(9, 0, 50.0)]);
    let fixed = builder.finish();

    let mut builder = arena.begin_queue();
    fill(&mut builder, &[(0, 0, 30.0), (1, 1, 10.0)]);
    let sorted = builder.finish();

    arena.sort(sorted, SortOrder::FrontToBack);
    assert_eq!(arena.batches(fixed)[0].mesh_index(), 9);
    assert_eq!(arena.batches(sorted)[0].distance(), 10.0);
}

#[test]
fn test_reset_bumps_generation() {
    let mut arena = BatchArena::new();
    let before = arena.generation();
    arena.reset();
    assert_ne!(arena.generation(), before);

    let range = arena.begin_queue().finish();
    arena.batches(range); // same generation: fine
}

#[test]
#[should_panic(expected = "generation")]
#[cfg(debug_assertions)]
fn test_stale_range_is_a_logic_error() {
    let mut arena = BatchArena::new();
    let mut builder = arena.begin_queue();
    fill(&mut builder, &[(0, 0, 1.0)]);
    let range = builder.finish();

    arena.reset();
    arena.batches(range);
}

#[test]
fn test_large_queue_sorts_fully() {
    let mut arena = BatchArena::new();
    let mut builder = arena.begin_queue();
    // Descending distances, enough entries to exercise the radix path
    for i in 0..4096u32 {
        builder.push(RenderBatch::encode(i % 7, i, (4096 - i) as f32));
    }
    let range = builder.finish();

    arena.sort(range, SortOrder::FrontToBack);
    let batches = arena.batches(range);
    for pair in batches.windows(2) {
        assert!(pair[0].key() <= pair[1].key());
    }
    assert_eq!(batches.len(), 4096);
}
