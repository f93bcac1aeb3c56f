//! Startup banner and session summary display.

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub topic: &'a str,
    pub topic_arn: &'a str,
    pub queue_url: &'a str,
    pub wait_time_seconds: i32,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║              T A L L Y                ║
   ║   numbers out, totals back, queued    ║
   ╚═══════════════════════════════════════╝

   version   {}
   topic     {}
   arn       {}
   queue     {}
   poll      {}s long poll

   Enter a number to push it, or `exit` to leave.
"#,
        env!("CARGO_PKG_VERSION"),
        info.topic,
        info.topic_arn,
        info.queue_url,
        info.wait_time_seconds,
    );
}

/// Print the session summary (push count + final total).
pub fn print_session_summary(pushes: u64, total: i64) {
    if pushes > 0 {
        println!("session: {pushes} value(s) pushed, final total {total}");
    }
    println!("goodbye.");
}
