//! Minimal host wiring a delegate through the dispatcher.
//!
//! Run with `RUST_LOG=debug` to see the dispatcher's decisions.

use gosub_browser_delegate::{
    BrowseDecision, BrowserEventDelegate, ContextMenu, ContextMenuParams, ContextMenuTypeFlags, DispatcherConfig,
    EventDispatcher, KeyEvent, KeyEventKind, Modifiers, RawContextMenuParams, WebPage, WindowOpenDisposition,
    MENU_ID_USER_FIRST,
};
use url::Url;

const MENU_ID_COPY_LINK: i32 = MENU_ID_USER_FIRST;
const MENU_ID_INSPECT: i32 = MENU_ID_USER_FIRST + 1;

struct Host {
    blocked_host: String,
}

impl BrowserEventDelegate for Host {
    fn on_before_browse(&mut self, url: &Url, _is_redirect: bool) -> bool {
        url.host_str() == Some(self.blocked_host.as_str())
    }

    fn on_before_context_menu(&mut self, _page: &WebPage, menu: &mut ContextMenu, params: &ContextMenuParams) {
        if params.has_type(ContextMenuTypeFlags::LINK) {
            let link = params.unfiltered_link_url().to_string();
            menu.add_item(MENU_ID_COPY_LINK, "Copy link address", true, move |_| {
                println!("copied: {link}");
            });
            menu.add_separator();
        }
        menu.add_item(MENU_ID_INSPECT, "Inspect", true, |page| {
            println!("inspect page {}", page.id());
        });
    }

    fn on_before_popup(&mut self, url: &Url, disposition: WindowOpenDisposition) -> bool {
        println!("popup {url} as {disposition}");
        disposition != WindowOpenDisposition::NewWindow
    }

    fn on_pre_key_event(&mut self, event: &KeyEvent) {
        println!("key: {event}");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DispatcherConfig::builder().log_key_events(true).build()?;
    let host = Host {
        blocked_host: "ads.example.com".to_string(),
    };
    let mut dispatcher = EventDispatcher::new(config, Box::new(host));

    for target in ["https://example.com/", "https://ads.example.com/banner"] {
        let url = Url::parse(target)?;
        match dispatcher.before_browse(&url, false) {
            BrowseDecision::Proceed => println!("navigating to {url}"),
            BrowseDecision::Cancel => println!("blocked {url}"),
        }
    }

    let popup = Url::parse("https://example.com/popup")?;
    println!("{:?}", dispatcher.before_popup(&popup, WindowOpenDisposition::NewWindow));

    let page = WebPage::with_url(Url::parse("https://example.com/")?);
    let raw = RawContextMenuParams {
        x: 42,
        y: 17,
        type_flags: (ContextMenuTypeFlags::PAGE | ContextMenuTypeFlags::LINK).bits(),
        link_url: "https://example.com/about".into(),
        unfiltered_link_url: "https://example.com/about".into(),
        page_url: "https://example.com/".into(),
        ..Default::default()
    };
    let presentation = dispatcher.before_context_menu(&page, &raw);
    for item in presentation.menu.items() {
        println!("menu: {:?}", item);
    }
    dispatcher.activate_menu_item(&presentation.menu, MENU_ID_COPY_LINK, &page)?;
    dispatcher.activate_menu_item(&presentation.menu, MENU_ID_INSPECT, &page)?;

    dispatcher.pre_key_event(&KeyEvent::new(KeyEventKind::RawKeyDown, 0x43, 0x2e).with_modifiers(Modifiers::CONTROL));

    Ok(())
}
