//! Standalone SVG markup from React icon components.
//!
//! Two shapes of component are understood:
//!
//! - **Compiled** modules from the shared package, where the SVG tree is a
//!   series of `jsx("path", { d: "…", fill: "…" })` calls. The markup is
//!   rebuilt from the `viewBox`, size and each `path`/`circle` props object.
//! - **Source** `.tsx`/`.jsx` components, where the SVG is written as JSX.
//!   The `<svg>…</svg>` block is lifted out and its JSX-only syntax rewritten
//!   into plain SVG attributes.
//!
//! Colours that only resolve at runtime (CSS variables, props) have no
//! meaning in a static preview and are replaced with [`DEFAULT_FILL`].

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Fill used where the component's colour is dynamic.
pub const DEFAULT_FILL: &str = "#333";

const DEFAULT_SIZE: &str = "24";

static WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bwidth:\s*["'](\d+)["']"#).unwrap());
static HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bheight:\s*["'](\d+)["']"#).unwrap());
static VIEWBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bviewBox:\s*["']([^"']+)["']"#).unwrap());

static PATH_PROPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']path["'],\s*\{([^}]*)\}"#).unwrap());
static CIRCLE_PROPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']circle["'],\s*\{([^}]*)\}"#).unwrap());

static D_PROP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bd:\s*["']([^"']+)["']"#).unwrap());
static FILL_PROP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bfill:\s*([^,}]+)").unwrap());
static CX_PROP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bcx:\s*["']([^"']+)["']"#).unwrap());
static CY_PROP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bcy:\s*["']([^"']+)["']"#).unwrap());
static R_PROP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\br:\s*["']([^"']+)["']"#).unwrap());

static SVG_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(<svg[^>]*>)(.*?)(</svg>)").unwrap());
static SPREAD_PROPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\{\s*\.\.\.\w+\s*\}").unwrap());
static EXPRESSION_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[\w-]+=\{[^}]+\}").unwrap());
static CAMEL_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\s)(fillRule|clipRule|clipPath|fillOpacity|strokeWidth|strokeLinecap|strokeLinejoin|strokeMiterlimit|strokeDasharray|strokeOpacity|stopColor|stopOpacity)=",
    )
    .unwrap()
});
static ATTR_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\swidth="(\d+)""#).unwrap());
static ATTR_HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\sheight="(\d+)""#).unwrap());
static VAR_FILL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"fill="(?:var\([^)]*\)|)""#).unwrap());

/// Extract markup from either component shape.
///
/// JSX markup is tried first; a compiled module only mentions `<svg` in
/// comments, so it falls through to the compiled extractor.
pub fn extract_svg(content: &str) -> Option<String> {
    extract_svg_from_source(content).or_else(|| extract_svg_from_compiled(content))
}

/// Rebuild an SVG from a compiled React component module.
///
/// Returns `None` without a `viewBox` or when no drawable element is found.
pub fn extract_svg_from_compiled(js: &str) -> Option<String> {
    let viewbox = VIEWBOX.captures(js)?.get(1)?.as_str();
    let width = first_capture(&WIDTH, js).unwrap_or(DEFAULT_SIZE);
    let height = first_capture(&HEIGHT, js).unwrap_or(DEFAULT_SIZE);

    let mut elements: Vec<String> = PATH_PROPS
        .captures_iter(js)
        .filter_map(|caps| path_element(&caps[1]))
        .collect();

    if elements.is_empty() {
        // Older builds emit `createElement` calls without a recognizable
        // element tag; fall back to every `d:` prop in the module.
        elements = D_PROP
            .captures_iter(js)
            .map(|caps| format!(r#"<path d="{}" fill="{DEFAULT_FILL}"/>"#, &caps[1]))
            .collect();
    }

    elements.extend(
        CIRCLE_PROPS
            .captures_iter(js)
            .filter_map(|caps| circle_element(&caps[1])),
    );

    if elements.is_empty() {
        return None;
    }

    Some(format!(
        r#"<svg width="{width}" height="{height}" viewBox="{viewbox}" fill="none" xmlns="http://www.w3.org/2000/svg">{}</svg>"#,
        elements.concat()
    ))
}

fn first_capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

fn path_element(props: &str) -> Option<String> {
    let d = first_capture(&D_PROP, props)?;
    let fill = static_fill(props);
    let rule = if props.contains("fillRule") {
        r#" fill-rule="evenodd" clip-rule="evenodd""#
    } else {
        ""
    };
    Some(format!(r#"<path d="{d}" fill="{fill}"{rule}/>"#))
}

fn circle_element(props: &str) -> Option<String> {
    let cx = first_capture(&CX_PROP, props)?;
    let cy = first_capture(&CY_PROP, props)?;
    let r = first_capture(&R_PROP, props)?;
    let fill = static_fill(props);
    Some(format!(
        r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#
    ))
}

/// The literal fill of a props object, or [`DEFAULT_FILL`] when the value is
/// an expression, a CSS variable, or missing.
fn static_fill(props: &str) -> String {
    let Some(raw) = first_capture(&FILL_PROP, props).map(str::trim) else {
        return DEFAULT_FILL.to_string();
    };
    let literal = raw
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| raw.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    match literal {
        Some(value) if !value.is_empty() && !value.contains("var(") => value.to_string(),
        _ => DEFAULT_FILL.to_string(),
    }
}

/// Lift the `<svg>` block out of a JSX component and rewrite it as SVG.
pub fn extract_svg_from_source(tsx: &str) -> Option<String> {
    let caps = SVG_BLOCK.captures(tsx)?;

    let mut open = jsx_to_svg_attributes(&caps[1]);
    let inner = jsx_to_svg_attributes(&caps[2])
        .replace("<>", "")
        .replace("</>", "");

    if !open.contains("viewBox")
        && let (Some(w), Some(h)) = (
            first_capture(&ATTR_WIDTH, &open),
            first_capture(&ATTR_HEIGHT, &open),
        )
    {
        let viewbox = format!(r#" viewBox="0 0 {w} {h}""#);
        let at = open.rfind('>').unwrap_or(open.len());
        let at = if open[..at].ends_with('/') { at - 1 } else { at };
        open.insert_str(at, &viewbox);
    }

    let svg = format!("{open}{inner}{}", &caps[3]);
    Some(VAR_FILL.replace_all(&svg, format!(r#"fill="{DEFAULT_FILL}""#)).into_owned())
}

fn jsx_to_svg_attributes(fragment: &str) -> String {
    let fragment = SPREAD_PROPS.replace_all(fragment, "");
    let fragment = EXPRESSION_ATTR.replace_all(&fragment, "");
    let fragment = fragment.replace("className=", "class=");
    CAMEL_ATTR
        .replace_all(&fragment, |caps: &Captures| {
            format!("{}{}=", &caps[1], kebab_case(&caps[2]))
        })
        .into_owned()
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPILED: &str = r##"import { jsx, jsxs } from "react/jsx-runtime";
const ArrowLeft = ({ color, ...props }) => /* @__PURE__ */ jsxs("svg", { width: "20", height: "20", viewBox: "0 0 20 20", fill: "none", ...props, children: [
  /* @__PURE__ */ jsx("path", { d: "M12.5 15L7.5 10L12.5 5", fill: color ?? "var(--icon-color)", fillRule: "evenodd", clipRule: "evenodd" }),
  /* @__PURE__ */ jsx("circle", { cx: "10", cy: "10", r: "2", fill: "#0A84FF" })
] });
export { ArrowLeft };
"##;

    #[test]
    fn compiled_component_rebuilt() {
        let svg = extract_svg_from_compiled(COMPILED).unwrap();
        assert_eq!(
            svg,
            concat!(
                r#"<svg width="20" height="20" viewBox="0 0 20 20" fill="none" xmlns="http://www.w3.org/2000/svg">"#,
                r##"<path d="M12.5 15L7.5 10L12.5 5" fill="#333" fill-rule="evenodd" clip-rule="evenodd"/>"##,
                r##"<circle cx="10" cy="10" r="2" fill="#0A84FF"/>"##,
                "</svg>"
            )
        );
    }

    #[test]
    fn compiled_without_viewbox_is_none() {
        let js = r#"jsx("path", { d: "M0 0L1 1" })"#;
        assert_eq!(extract_svg_from_compiled(js), None);
    }

    #[test]
    fn compiled_without_elements_is_none() {
        let js = r#"jsx("svg", { viewBox: "0 0 24 24" })"#;
        assert_eq!(extract_svg_from_compiled(js), None);
    }

    #[test]
    fn compiled_default_size_is_24() {
        let js = r#"jsx("svg", { viewBox: "0 0 16 16", children: jsx("path", { d: "M1 1H15" }) })"#;
        let svg = extract_svg_from_compiled(js).unwrap();
        assert!(svg.starts_with(r#"<svg width="24" height="24" viewBox="0 0 16 16""#));
        assert!(svg.contains(r##"<path d="M1 1H15" fill="#333"/>"##));
    }

    #[test]
    fn compiled_literal_fill_kept() {
        let js = r#"jsx("svg", { viewBox: "0 0 8 8", children: jsx("path", { d: "M0 0H8", fill: 'white' }) })"#;
        let svg = extract_svg_from_compiled(js).unwrap();
        assert!(svg.contains(r#"fill="white""#));
    }

    #[test]
    fn compiled_createelement_fallback() {
        let js = r#"React.createElement(Svg, { viewBox: "0 0 24 24" }, React.createElement(P, { d: "M3 3L21 21" }))"#;
        let svg = extract_svg_from_compiled(js).unwrap();
        assert!(svg.contains(r#"d="M3 3L21 21""#));
    }

    const SOURCE: &str = r#"import React from 'react';

export default function PiggyBank({ color, ...props }: IconProps) {
  return (
    <svg width="32" height="32" fill="none" className="icon" {...props}>
      <>
        <path d="M4 4H28" fill={color} strokeWidth="2" />
        <path d="M4 28H28" fill="var(--brand)" fillRule="evenodd" />
        <clipPath id="clip0"><rect width="32" height="32" /></clipPath>
      </>
    </svg>
  );
}
"#;

    #[test]
    fn source_component_converted() {
        let svg = extract_svg_from_source(SOURCE).unwrap();
        assert!(svg.starts_with(r#"<svg width="32" height="32" fill="none" class="icon" viewBox="0 0 32 32">"#));
        assert!(svg.contains(r#"<path d="M4 4H28" stroke-width="2" />"#));
        assert!(svg.contains(r##"fill="#333" fill-rule="evenodd""##));
        assert!(svg.contains("<clipPath id=\"clip0\">"));
        assert!(!svg.contains("<>"));
        assert!(!svg.contains("{"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn source_viewbox_kept_when_present() {
        let tsx = r#"const X = () => <svg viewBox="0 0 10 10" width="10" height="10"><path d="M0 0"/></svg>;"#;
        let svg = extract_svg_from_source(tsx).unwrap();
        assert_eq!(svg.matches("viewBox").count(), 1);
    }

    #[test]
    fn source_without_svg_is_none() {
        assert_eq!(extract_svg_from_source("export const X = () => null;"), None);
    }

    #[test]
    fn empty_fill_replaced() {
        let tsx = r#"<svg viewBox="0 0 1 1"><path d="M0 0" fill=""/></svg>"#;
        let svg = extract_svg_from_source(tsx).unwrap();
        assert!(svg.contains(r##"fill="#333""##));
    }

    #[test]
    fn dispatch_by_shape() {
        assert!(extract_svg(SOURCE).unwrap().contains("class=\"icon\""));
        assert!(extract_svg(COMPILED).unwrap().contains("xmlns"));
    }

    #[test]
    fn compiled_module_mentioning_svg_in_comment() {
        let js = format!("/** Renders the arrow <svg> icon. */\n{COMPILED}");
        let svg = extract_svg(&js).unwrap();
        assert!(svg.contains("M12.5 15L7.5 10L12.5 5"));
    }

    #[test]
    fn kebab_case_attribute_names() {
        assert_eq!(kebab_case("strokeLinejoin"), "stroke-linejoin");
        assert_eq!(kebab_case("fill"), "fill");
    }
}
