use clap::Args;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::demos::{
    AstarPage, Demo, EightPuzzlePage, ResolverPage, TicTacToePage, TourPage, WaterJugPage,
};
use crate::settings::{Settings, SettingsView};
use crate::utils::*;

/// `None` is the landing page.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct SelectedDemo(Option<Demo>);

impl StorageKey for SelectedDemo {
    const KEY: &'static str = "searchlab:page";
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct AppProps {
    /// Base URL of the solver service (defaults to same-origin)
    #[arg(long)]
    pub api: Option<String>,
}

pub(crate) enum Msg {
    Select(Option<Demo>),
    ToggleSettings,
    UpdateSettings(Settings),
}

pub(crate) struct App {
    settings: Settings,
    selected: SelectedDemo,
    settings_open: bool,
}

impl App {
    fn landing_view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="landing">
                {
                    for Demo::ALL.map(|demo| {
                        let onclick = ctx.link().callback(move |_| Msg::Select(Some(demo)));
                        html! {
                            <article class="demo-card" {onclick}>
                                <h2>{demo.title()}</h2>
                            </article>
                        }
                    })
                }
            </div>
        }
    }

    fn demo_view(&self, ctx: &Context<Self>, demo: Demo) -> Html {
        let api: AttrValue = ctx
            .props()
            .api
            .clone()
            .unwrap_or_default()
            .into();
        let reveal_ms = self.settings.reveal_ms;

        match demo {
            Demo::Tour => html! { <TourPage {api} {reveal_ms}/> },
            Demo::TicTacToe => html! { <TicTacToePage {api} {reveal_ms}/> },
            Demo::WaterJug => html! { <WaterJugPage {api} {reveal_ms}/> },
            Demo::EightPuzzle => html! { <EightPuzzlePage {api} {reveal_ms}/> },
            Demo::Astar => html! { <AstarPage {api} {reveal_ms}/> },
            Demo::Resolver => html! { <ResolverPage {api} {reveal_ms}/> },
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        let settings: Settings = LocalOrDefault::local_or_default();
        settings.theme.apply();

        Self {
            settings,
            selected: LocalOrDefault::local_or_default(),
            settings_open: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Select(demo) => {
                if self.selected.0 == demo {
                    return false;
                }
                self.selected = SelectedDemo(demo);
                self.selected.local_save();
                true
            }
            Msg::ToggleSettings => {
                self.settings_open = !self.settings_open;
                true
            }
            Msg::UpdateSettings(settings) => {
                if self.settings == settings {
                    return false;
                }
                if self.settings.theme != settings.theme {
                    settings.theme.apply();
                }
                self.settings = settings;
                self.settings.local_save();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let cb_home = ctx.link().callback(|_| Msg::Select(None));
        let cb_show_settings = ctx.link().callback(|_| Msg::ToggleSettings);

        let body = match self.selected.0 {
            None => self.landing_view(ctx),
            Some(demo) => self.demo_view(ctx, demo),
        };

        html! {
            <div class="searchlab">
                <header>
                    <a class="brand" onclick={cb_home}>{"searchlab"}</a>
                    <small onclick={cb_show_settings}>{"···"}</small>
                </header>
                <main>{body}</main>
                <SettingsView
                    open={self.settings_open}
                    settings={self.settings}
                    on_change={ctx.link().callback(Msg::UpdateSettings)}
                    on_close={ctx.link().callback(|_| Msg::ToggleSettings)}
                />
            </div>
        }
    }
}
