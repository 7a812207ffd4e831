//! Property tests for the desktop components
//!
//! Random operation sequences against the window manager, split controller,
//! compositor and workspace, checking the invariants that must always hold.

use proptest::prelude::*;

use nova_desk::{
    compose, ArtifactKind, FileArtifact, FileId, FileWorkspace, PreviewOptions, SplitBounds,
    SplitPaneController, TrackRegion, WindowKind, WindowManager,
};

#[derive(Debug, Clone)]
enum WindowOp {
    Toggle(WindowKind),
    Raise(WindowKind),
    Maximize(WindowKind),
}

fn window_kind() -> impl Strategy<Value = WindowKind> {
    prop_oneof![Just(WindowKind::Editor), Just(WindowKind::Explorer)]
}

fn window_op() -> impl Strategy<Value = WindowOp> {
    prop_oneof![
        window_kind().prop_map(WindowOp::Toggle),
        window_kind().prop_map(WindowOp::Raise),
        window_kind().prop_map(WindowOp::Maximize),
    ]
}

#[derive(Debug, Clone)]
enum PointerOp {
    Press(f64, f64),
    Move(f64),
    Release,
    Cancel,
}

fn pointer_op() -> impl Strategy<Value = PointerOp> {
    prop_oneof![
        (-500.0f64..500.0, 1.0f64..2000.0).prop_map(|(o, w)| PointerOp::Press(o, w)),
        (-3000.0f64..3000.0).prop_map(PointerOp::Move),
        Just(PointerOp::Release),
        Just(PointerOp::Cancel),
    ]
}

proptest! {
    /// Focus always sits on the open window with the highest z-index
    #[test]
    fn focus_is_topmost_open_window(ops in prop::collection::vec(window_op(), 0..64)) {
        let mut windows = WindowManager::new();
        let mut last_top = windows.top_z();

        for op in ops {
            let _ = match op {
                WindowOp::Toggle(kind) => windows.toggle(kind).map(|_| ()),
                WindowOp::Raise(kind) => windows.raise(kind).map(|_| ()),
                WindowOp::Maximize(kind) => windows.toggle_maximize(kind).map(|_| ()),
            };

            prop_assert!(windows.top_z() >= last_top, "z counter went backwards");
            last_top = windows.top_z();

            if let Some(kind) = windows.focus_of() {
                prop_assert!(windows.descriptor(kind).unwrap().is_open);
                prop_assert!(windows.is_topmost(kind).unwrap());
            }

            let order = windows.paint_order();
            prop_assert!(order.windows(2).all(|pair| pair[0].z_index <= pair[1].z_index));
            prop_assert!(order.iter().all(|w| w.is_open));
        }
    }

    /// Raising never lowers any window
    #[test]
    fn raise_never_lowers(ops in prop::collection::vec(window_op(), 0..64)) {
        let mut windows = WindowManager::new();

        for op in ops {
            let before: Vec<u64> = windows.descriptors().map(|w| w.z_index).collect();
            let _ = match op {
                WindowOp::Toggle(kind) => windows.toggle(kind).map(|_| ()),
                WindowOp::Raise(kind) => windows.raise(kind).map(|_| ()),
                WindowOp::Maximize(kind) => windows.toggle_maximize(kind).map(|_| ()),
            };
            let after: Vec<u64> = windows.descriptors().map(|w| w.z_index).collect();

            prop_assert!(before.iter().zip(&after).all(|(b, a)| a >= b));
        }
    }

    /// The ratio stays within bounds whatever the pointer does
    #[test]
    fn split_ratio_stays_in_bounds(
        min in 0.0f64..50.0,
        span in 1.0f64..50.0,
        ops in prop::collection::vec(pointer_op(), 0..64),
    ) {
        let bounds = SplitBounds::new(min, min + span).unwrap();
        let mut split = SplitPaneController::new(50.0, bounds);

        for op in ops {
            let idle_ratio = split.ratio();
            let was_tracking = split.is_tracking();

            match op {
                PointerOp::Press(origin, width) => {
                    split.press(TrackRegion::new(origin, width).unwrap());
                }
                PointerOp::Move(x) => {
                    let moved = split.pointer_moved(x);
                    if !was_tracking {
                        prop_assert_eq!(moved, None);
                        prop_assert_eq!(split.ratio(), idle_ratio);
                    }
                }
                PointerOp::Release => split.release(),
                PointerOp::Cancel => split.cancel_tracking(),
            }

            prop_assert!(split.ratio() >= bounds.min());
            prop_assert!(split.ratio() <= bounds.max());
        }
    }

    /// Same snapshot, same document; every contribution present once
    #[test]
    fn compose_is_pure_and_complete(
        markup in "[a-z ]{0,40}",
        style in "[a-z{}:; ]{0,40}",
        script in "[a-z(); ]{0,40}",
    ) {
        let files = vec![
            FileArtifact::new("1", "index.html", ArtifactKind::Markup, markup.clone()),
            FileArtifact::new("2", "style.css", ArtifactKind::Style, style.clone()),
            FileArtifact::new("3", "main.js", ArtifactKind::Script, script.clone()),
        ];
        let options = PreviewOptions::default();

        let first = compose(&files, &options);
        let second = compose(&files, &options);
        prop_assert_eq!(&first, &second);

        let body = format!("<body>{}<script>{}</script></body>", markup, script);
        let style_block = format!("<style>{}</style>", style);
        prop_assert!(first.html.contains(&body));
        prop_assert!(first.html.contains(&style_block));
        prop_assert_eq!(first.html.matches("<body>").count(), 1);
    }

    /// Changing the script leaves the markup and style untouched
    #[test]
    fn script_edit_only_changes_script(old in "[a-z]{1,20}", new in "[A-Z]{1,20}") {
        let mut files = vec![
            FileArtifact::new("1", "index.html", ArtifactKind::Markup, "<p>x</p>"),
            FileArtifact::new("2", "style.css", ArtifactKind::Style, "p{}"),
            FileArtifact::new("3", "main.js", ArtifactKind::Script, old.clone()),
        ];
        let options = PreviewOptions::default();
        let before = compose(&files, &options);

        files[2].content = new.clone();
        let after = compose(&files, &options);

        // Everything up to the inline script block is identical
        let before_split = before.html.rfind("<script>").unwrap();
        let after_split = after.html.rfind("<script>").unwrap();
        prop_assert_eq!(before_split, after_split);
        prop_assert_eq!(&before.html[..before_split], &after.html[..after_split]);

        let script_block = format!("<script>{}</script>", new);
        prop_assert!(after.html[after_split..].starts_with(&script_block));
    }

    /// Editing one file never touches another or the selection
    #[test]
    fn edit_is_local(index in 0usize..3, content in ".{0,40}") {
        let mut workspace = FileWorkspace::new();
        workspace.load(vec![
            FileArtifact::new("1", "index.html", ArtifactKind::Markup, "a"),
            FileArtifact::new("2", "style.css", ArtifactKind::Style, "b"),
            FileArtifact::new("3", "main.js", ArtifactKind::Script, "c"),
        ]);
        let before = workspace.files().to_vec();
        let active = workspace.active_id().cloned();

        let id = FileId::from((index + 1).to_string());
        workspace.edit(&id, content.clone()).unwrap();

        prop_assert_eq!(workspace.active_id().cloned(), active);
        for (i, (old, new)) in before.iter().zip(workspace.files()).enumerate() {
            if i == index {
                prop_assert_eq!(&new.content, &content);
            } else {
                prop_assert_eq!(old, new);
            }
        }
    }
}
