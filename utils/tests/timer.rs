use std::thread;
use std::time::Duration;

use utils::timer::Timer;

#[test]
fn test_nested_timers() {
    let _ = env_logger::builder().is_test(true).try_init();

    let build = Timer::new("build allowlist tree", true);
    let leaves = Timer::new("hash leaves", true);
    thread::sleep(Duration::from_millis(5));
    leaves.print("3 leaves");
    leaves.stop();
    let levels = Timer::new("hash levels", false);
    levels.stop();
    build.stop();

    #[cfg(feature = "profile")]
    assert_eq!(
        utils::timer::CALL_DEPTH.load(std::sync::atomic::Ordering::Relaxed),
        0
    );
}
