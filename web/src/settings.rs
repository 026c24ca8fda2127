use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::theme::Theme;
use crate::utils::*;

/// Milliseconds between automatic step reveals.
pub(crate) const REVEAL_PRESETS: [u32; 3] = [1000, 1250, 1500];

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub theme: Theme,
    pub reveal_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            reveal_ms: REVEAL_PRESETS[0],
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "searchlab:settings";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub settings: Settings,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    if !props.open {
        return html! {};
    }

    let settings = props.settings;

    let theme_choice = |theme: Theme| {
        let on_change = props.on_change.clone();
        let onclick = Callback::from(move |_| {
            on_change.emit(Settings { theme, ..settings });
        });
        html! {
            <button class={classes!((settings.theme == theme).then_some("selected"))} {onclick}>
                {theme.label()}
            </button>
        }
    };

    let cadence_choice = |reveal_ms: u32| {
        let on_change = props.on_change.clone();
        let onclick = Callback::from(move |_| {
            on_change.emit(Settings {
                reveal_ms,
                ..settings
            });
        });
        html! {
            <button class={classes!((settings.reveal_ms == reveal_ms).then_some("selected"))} {onclick}>
                {format!("{} ms", reveal_ms)}
            </button>
        }
    };

    let on_close = props.on_close.clone();
    let cb_close = Callback::from(move |_: MouseEvent| on_close.emit(()));

    html! {
        <Modal>
            <dialog id="settings" open={true}>
                <article>
                    <h2>{"Settings"}</h2>
                    <section>
                        <h3>{"Theme"}</h3>
                        { for [Theme::Auto, Theme::Light, Theme::Dark].map(theme_choice) }
                    </section>
                    <section>
                        <h3>{"Reveal cadence"}</h3>
                        { for REVEAL_PRESETS.map(cadence_choice) }
                    </section>
                    <footer>
                        <button onclick={cb_close}>{"Close"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}
