//! Dashboard Demo: tabs, a form, a scrolling list and progress bars.
//!
//! Keys:
//! - Tab / Shift+Tab: move focus
//! - Esc: leave the focused tab; Tab to re-enter
//! - F2: next tab
//! - Ctrl+P: advance the progress bars
//! - Ctrl+C or Ctrl+Q: quit
//!
//! Logs go to `gridloom-dashboard.log` (filter with `GRIDLOOM_LOG`).

use gridloom::widget::{
    AxisLayout, Button, Frame, Label, ListBox, ProgressBar, ProgressStyle, TabBox, TextEntry,
    WidgetId, WidgetTree,
};
use gridloom::{Engine, EngineConfig};
use std::ops::ControlFlow;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    NextTab,
    Advance,
    Quit,
}

struct Ids {
    tabs: WidgetId,
    bars: Vec<WidgetId>,
    status: WidgetId,
}

fn init_logging() -> WorkerGuard {
    let appender = tracing_appender::rolling::never(".", "gridloom-dashboard.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("GRIDLOOM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn form(tree: &mut WidgetTree) -> WidgetId {
    let name = tree.insert(TextEntry::new("").with_max_length(40));
    let email = tree.insert(TextEntry::new(""));
    let name = tree.insert(Frame::new("Name", name));
    let email = tree.insert(Frame::new("Email", email));
    let save = tree.insert(Button::new("Save").on_press(|| tracing::info!("save pressed")));
    let reset = tree.insert(Button::new("Reset"));
    let buttons = tree.insert(AxisLayout::row().with_child(save).with_child(reset));
    tree.insert(
        AxisLayout::column()
            .with_child(name)
            .with_child(email)
            .with_child(buttons),
    )
}

fn tasks(tree: &mut WidgetTree) -> WidgetId {
    let items = (1..=40)
        .map(|i| tree.insert(Label::new(format!("Task #{i:02}"))))
        .collect();
    let list = tree.insert(ListBox::new(items));
    tree.insert(Frame::new("Tasks", list))
}

fn progress(tree: &mut WidgetTree) -> (WidgetId, Vec<WidgetId>) {
    let styles = [
        ProgressStyle::Solid,
        ProgressStyle::Ascii,
        ProgressStyle::Block,
        ProgressStyle::Line,
    ];
    let mut column = AxisLayout::column();
    let mut bars = Vec::with_capacity(styles.len());
    for style in styles {
        let bar = tree.insert(ProgressBar::new().with_style(style));
        let label = tree.insert(Label::new(format!("{style:?}")));
        let row = tree.insert(AxisLayout::row().with_weighted(label, 20).with_weighted(bar, 80));
        column.push(row, 100);
        bars.push(bar);
    }
    (tree.insert(column), bars)
}

fn build() -> (WidgetTree, Ids) {
    let mut tree = WidgetTree::new();
    let form = form(&mut tree);
    let tasks = tasks(&mut tree);
    let (progress, bars) = progress(&mut tree);
    let tabs = tree.insert(
        TabBox::new()
            .with_tab("Form", form)
            .with_tab("Tasks", tasks)
            .with_tab("Progress", progress),
    );
    let status = tree.insert(Label::new("F2 next tab | Ctrl+P progress | Ctrl+Q quit"));
    let root = tree.insert(AxisLayout::column().with_weighted(tabs, 1000).with_child(status));
    tree.set_root(root);
    (tree, Ids { tabs, bars, status })
}

fn apply(tree: &mut WidgetTree, ids: &Ids, action: Action) -> ControlFlow<()> {
    match action {
        Action::Quit => return ControlFlow::Break(()),
        Action::NextTab => {
            if let Some(tabs) = tree.get_mut::<TabBox>(ids.tabs) {
                let next = (tabs.selected() + 1) % tabs.len().max(1);
                tabs.select(next);
            }
            tree.request_relayout();
        }
        Action::Advance => {
            for (i, &bar) in ids.bars.iter().enumerate() {
                if let Some(bar) = tree.get_mut::<ProgressBar>(bar) {
                    #[allow(clippy::cast_precision_loss)]
                    bar.increment(0.05 * (i + 1) as f32);
                }
            }
        }
    }
    if let Some(status) = tree.get_mut::<Label>(ids.status) {
        status.set_text(format!("last action: {action:?}"));
    }
    ControlFlow::Continue(())
}

fn main() -> gridloom::Result<()> {
    let _log = init_logging();
    let (tree, ids) = build();

    let mut engine: Engine<_, Action> = Engine::new(tree, EngineConfig::from_env())?;
    engine.bind("f2", Action::NextTab)?;
    engine.bind("ctrl p", Action::Advance)?;
    engine.bind("ctrl q", Action::Quit)?;

    let restorer = engine.channel().restorer();
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restorer.restore();
        default_hook(info);
    }));

    engine.run(|tree, action| apply(tree, &ids, action))
}
