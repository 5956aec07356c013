//! Console progress rendering for store loads.
//!
//! The load path only knows about an advisory `(done, total)` callback;
//! this module owns the indicatif bar the CLI feeds it with.

use indicatif::{ProgressBar, ProgressStyle};

/// Build the bar shown while the embeddings file loads.
pub fn load_bar(label: &str) -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {percent}%")
            .expect("static template is valid")
            .progress_chars("█░ "),
    );
    bar.set_message(label.to_string());
    bar
}

/// Adapt a bar into the `(done, total)` callback the load path accepts.
pub fn as_callback(bar: &ProgressBar) -> impl FnMut(usize, usize) + '_ {
    move |done, total| {
        if bar.length() != Some(total as u64) {
            bar.set_length(total as u64);
        }
        bar.set_position(done as u64);
    }
}
