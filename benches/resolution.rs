//! Resolution Benchmarks
//!
//! Measures keystroke resolution with growing override tables and the cost
//! of the full button and encoder event paths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keystroke_engine::input::{
    keycodes, Action, Actions, ActionsTemplate, EncoderDirection, FnEmitter, Keystroke,
};
use std::collections::BTreeSet;

/// Action with `overrides` modifier entries on even ids
fn action_with_overrides(overrides: u8) -> Action {
    let mut action = Action::with_keystroke(Keystroke::key(keycodes::KEY_A));
    for i in 0..overrides {
        action.set_modified_keystroke(i * 2, Keystroke::key(u32::from(i) + 100));
    }
    action
}

fn bench_desired_keystroke(c: &mut Criterion) {
    let mut group = c.benchmark_group("desired_keystroke");

    for overrides in [0u8, 8, 64] {
        let action = action_with_overrides(overrides);

        // Odd ids never match, forcing a full scan of the held set
        let miss: BTreeSet<u8> = (0..16).map(|i| i * 2 + 1).collect();
        group.bench_with_input(BenchmarkId::new("miss", overrides), &miss, |b, held| {
            b.iter(|| black_box(action.desired_keystroke(black_box(held))))
        });

        let hit: BTreeSet<u8> = [0u8].into_iter().collect();
        group.bench_with_input(BenchmarkId::new("hit", overrides), &hit, |b, held| {
            b.iter(|| black_box(action.desired_keystroke(black_box(held))))
        });
    }

    group.finish();
}

fn bench_issue_paths(c: &mut Criterion) {
    let actions = Actions::new(FnEmitter::new(|keystroke, pressed| {
        black_box((keystroke, pressed));
    }));

    let mut template = ActionsTemplate::new();
    for button in 0..32 {
        *template.button_mut(button) = action_with_overrides(4);
    }
    template
        .encoder_mut(0, EncoderDirection::Clockwise)
        .set_keystroke(Keystroke::key(keycodes::KEY_VOLUMEUP));
    actions.load_template(template);

    c.bench_function("issue_button_press_release", |b| {
        b.iter(|| {
            actions.issue_button(black_box(7), true);
            actions.issue_button(black_box(7), false);
        })
    });

    c.bench_function("issue_encoder_4_detents", |b| {
        b.iter(|| actions.issue_encoder(black_box(0), black_box(4)))
    });

    c.bench_function("load_template_32_buttons", |b| {
        let template = actions.snapshot_template();
        b.iter(|| actions.load_template(template.clone()))
    });
}

criterion_group!(benches, bench_desired_keystroke, bench_issue_paths);
criterion_main!(benches);
