// Unit tests for business rules

use super::*;

fn indices(plan: &ChunkPlan) -> Vec<u32> {
    plan.spans.iter().map(|s| s.index).collect()
}

#[test]
fn test_plan_floors_partial_chunk() {
    let plan = ChunkPlanner::plan(95.0, 10, TailPolicy::Drop).unwrap();
    assert_eq!(plan.len(), 9);
    assert_eq!(indices(&plan), (0..9).collect::<Vec<_>>());

    let last = plan.spans.last().unwrap();
    assert_eq!(last.start.seconds, 80.0);
    assert_eq!(last.duration.seconds, 10.0);
}

#[test]
fn test_plan_exact_multiple() {
    let plan = ChunkPlanner::plan(30.0, 10, TailPolicy::Drop).unwrap();
    assert_eq!(plan.len(), 3);
    let starts: Vec<f64> = plan.spans.iter().map(|s| s.start.seconds).collect();
    assert_eq!(starts, vec![0.0, 10.0, 20.0]);
}

#[test]
fn test_plan_emits_tail_when_requested() {
    let plan = ChunkPlanner::plan(95.0, 10, TailPolicy::Emit).unwrap();
    assert_eq!(plan.len(), 10);

    let tail = plan.spans.last().unwrap();
    assert_eq!(tail.index, 9);
    assert_eq!(tail.start.seconds, 90.0);
    assert!((tail.duration.seconds - 5.0).abs() < 1e-9);
}

#[test]
fn test_plan_skips_negligible_tail() {
    let plan = ChunkPlanner::plan(30.05, 10, TailPolicy::Emit).unwrap();
    assert_eq!(plan.len(), 3);
}

#[test]
fn test_plan_chunk_longer_than_source() {
    let plan = ChunkPlanner::plan(8.0, 10, TailPolicy::Drop).unwrap();
    assert!(plan.is_empty());

    let plan = ChunkPlanner::plan(8.0, 10, TailPolicy::Emit).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.spans[0].duration.seconds, 8.0);
}

#[test]
fn test_plan_rejects_bad_inputs() {
    assert!(matches!(
        ChunkPlanner::plan(95.0, 0, TailPolicy::Drop),
        Err(DomainError::BadArgs(_))
    ));
    assert!(matches!(
        ChunkPlanner::plan(f64::NAN, 10, TailPolicy::Drop),
        Err(DomainError::ProbeFail(_))
    ));
    assert!(ChunkPlanner::plan(-1.0, 10, TailPolicy::Drop).is_err());
}

#[test]
fn test_full_chunk_count() {
    assert_eq!(ChunkPlanner::full_chunk_count(95.0, 10), 9);
    assert_eq!(ChunkPlanner::full_chunk_count(100.0, 10), 10);
    assert_eq!(ChunkPlanner::full_chunk_count(9.99, 10), 0);
    assert_eq!(ChunkPlanner::full_chunk_count(95.0, 0), 0);
}

#[test]
fn test_encoding_policy_audio() {
    assert_eq!(EncodingPolicy::audio_handling(OutputFormat::Gif), AudioHandling::Drop);
    assert_eq!(EncodingPolicy::audio_handling(OutputFormat::Mp4), AudioHandling::Copy);
    assert_eq!(EncodingPolicy::audio_args(OutputFormat::Mp4), &["-c:a", "copy"]);
    assert!(!EncodingPolicy::audio_args(OutputFormat::Gif).contains(&"copy"));
}

#[test]
fn test_overwrite_guard() {
    assert!(OverwriteGuard::check(OverwritePolicy::Never, false, "a.gif").is_ok());
    assert!(OverwriteGuard::check(OverwritePolicy::Always, true, "a.gif").is_ok());
    assert!(matches!(
        OverwriteGuard::check(OverwritePolicy::Never, true, "a.gif"),
        Err(DomainError::FsFail(_))
    ));
    assert_eq!(OverwriteGuard::ffmpeg_flag(OverwritePolicy::Always), "-y");
    assert_eq!(OverwriteGuard::ffmpeg_flag(OverwritePolicy::Never), "-n");
}
