use crate::constants::*;
use crate::core::constants::PANEL_COUNT;
use anyhow::{anyhow, Result};
use wasm_bindgen::JsCast;
use web_sys as web;

const BIO_HTML: &str = "I am a design lead working on consumer Copilot at \
<a href=\"https://microsoft.ai/news/towards-humanist-superintelligence/\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"link\">Microsoft AI</a>. \
Before, I was at Figma directing its inaugural \
<a href=\"https://www.firstround.com/ai/figma\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"link\">AI model training</a> team, \
and before that I spent years \
<a href=\"https://www.youtube.com/watch?v=PG3tQYlZ6JQ\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"link\">prototyping the metaverse</a> at Spatial.";

const PANEL_LABELS: [&str; PANEL_COUNT] = ["Work", "Writing", "Talks", "Contact"];

const STYLES: &str = "\
.unicorn-embed { position: fixed; top: 0; left: 50%; transform: translateX(-50%); width: 100vw; height: calc(var(--vh, 1vh) * 100); }
.bio-text { position: fixed; top: 50%; left: 50%; transform: translate(-50%, -50%); will-change: transform, opacity; }
.panel-grid { position: relative; display: grid; grid-template-columns: repeat(2, 1fr); gap: 16px; margin-top: calc(var(--vh, 1vh) * 200); padding: 16px; }
.glass-panel { opacity: 0; transform-origin: center bottom; backdrop-filter: blur(16px); touch-action: manipulation; }
.glass-panel.pressed { transition: transform 80ms ease-out; }
.glass-panel.releasing { transition: transform 350ms cubic-bezier(0.34, 1.56, 0.64, 1); }
";

/// Elements the view drives.
#[derive(Clone)]
pub struct PageRefs {
    pub root: web::HtmlElement,
    pub embed: web::HtmlElement,
    pub bio: web::HtmlElement,
    pub panels: Vec<web::HtmlElement>,
}

/// Find the page elements, creating whichever are missing.
pub fn render(document: &web::Document) -> Result<PageRefs> {
    install_styles(document)?;

    let body = document.body().ok_or_else(|| anyhow!("document has no body"))?;
    let root = find_or_create(document, &body, ROOT_ID, "div", "")?;

    let embed = find_or_create(document, &root, EMBED_ID, "div", EMBED_CLASS)?;
    _ = embed.set_attribute("data-us-project", ENGINE_PROJECT_ID);
    _ = embed.set_attribute("data-us-production", "true");

    let bio = find_or_create(document, &root, BIO_ID, "p", BIO_CLASS)?;
    if bio.inner_html().trim().is_empty() {
        bio.set_inner_html(BIO_HTML);
    }

    let panels = render_panels(document, &root)?;
    log::info!("[view] markup ready ({} panels)", panels.len());

    Ok(PageRefs {
        root,
        embed,
        bio,
        panels,
    })
}

fn render_panels(document: &web::Document, root: &web::HtmlElement) -> Result<Vec<web::HtmlElement>> {
    let existing = collect_panels(root)?;
    if !existing.is_empty() {
        return Ok(existing);
    }

    let grid = create(document, "div", PANEL_GRID_CLASS)?;
    for label in PANEL_LABELS {
        let panel = create(document, "div", PANEL_CLASS)?;
        panel.set_text_content(Some(label));
        _ = panel.set_attribute("role", "button");
        _ = panel.set_attribute("tabindex", "0");
        grid.append_child(&panel).map_err(js_err)?;
    }
    root.append_child(&grid).map_err(js_err)?;
    collect_panels(root)
}

fn collect_panels(root: &web::HtmlElement) -> Result<Vec<web::HtmlElement>> {
    let nodes = root
        .query_selector_all(&format!(".{PANEL_CLASS}"))
        .map_err(js_err)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect())
}

fn find_or_create(
    document: &web::Document,
    parent: &web::HtmlElement,
    id: &str,
    tag: &str,
    class: &str,
) -> Result<web::HtmlElement> {
    if let Some(el) = document.get_element_by_id(id) {
        return el
            .dyn_into::<web::HtmlElement>()
            .map_err(|_| anyhow!("#{id} is not an HTML element"));
    }
    let el = create(document, tag, class)?;
    el.set_id(id);
    parent.append_child(&el).map_err(js_err)?;
    Ok(el)
}

fn create(document: &web::Document, tag: &str, class: &str) -> Result<web::HtmlElement> {
    let el = document
        .create_element(tag)
        .map_err(js_err)?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow!("<{tag}> is not an HTML element"))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

fn install_styles(document: &web::Document) -> Result<()> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document
        .create_element("style")
        .map_err(js_err)?
        .dyn_into::<web::HtmlStyleElement>()
        .map_err(|_| anyhow!("<style> is not a style element"))?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(STYLES));
    match document.head() {
        Some(head) => head.append_child(&style).map_err(js_err)?,
        None => document
            .body()
            .ok_or_else(|| anyhow!("document has no head or body"))?
            .append_child(&style)
            .map_err(js_err)?,
    };
    Ok(())
}

#[inline]
fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}
