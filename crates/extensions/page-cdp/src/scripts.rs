//! Page-side scripts.
//!
//! Elements handed to the automaton are tagged with [`REF_ATTR`] so later
//! calls can find them again. Every element operation returns
//! `{ok: true}` or `{ok: false, reason: "detached" | "disabled"}`.

use serde_json::Value;

/// Data attribute carrying an element handle.
pub const REF_ATTR: &str = "data-autoapply-ref";

pub const CONTAINER_SELECTOR: &str = ".fb-dash-form-element";

pub const ENTRY_SELECTORS: &[&str] = &[
    ".jobs-apply-button--top-card button",
    "#jobs-apply-button-id",
    ".jobs-apply-button",
];

pub const CONTINUE_SELECTORS: &[&str] = &[
    r#"button[aria-label="Continue to next step"]"#,
    r#"button[aria-label="Next"]"#,
];

pub const REVIEW_SELECTORS: &[&str] = &[
    r#"button[aria-label="Review your application"]"#,
    "button[data-live-test-easy-apply-review-button]",
];

pub const SUBMIT_SELECTORS: &[&str] = &[r#"button[aria-label="Submit application"]"#];

pub const DISMISS_SELECTORS: &[&str] = &[
    r#"button[aria-label="Done"]"#,
    "button[data-test-modal-close-btn]",
    ".artdeco-modal__dismiss",
    r#"button[aria-label*="Dismiss"]"#,
];

pub const SUCCESS_SELECTORS: &[&str] = &[
    "div[data-test-application-success]",
    ".artdeco-inline-feedback--success",
    "div[data-test-success-message]",
    r#"[data-test="success-message"]"#,
    ".jobs-apply-confirmation",
    ".jobs-apply-success",
];

pub const SUCCESS_HEADINGS: &[&str] = &["Application submitted", "Application sent"];

/// JSON-encode a value for splicing into script source.
fn js(value: impl Into<Value>) -> String {
    value.into().to_string()
}

fn js_list(items: &[&str]) -> String {
    js(items.iter().map(|s| Value::from(*s)).collect::<Vec<_>>())
}

/// Shared helper: assign or read an element handle.
fn ref_helper() -> String {
    format!(
        r#"const ATTR = {attr};
  const ref = (el) => {{
    if (!el.getAttribute(ATTR)) {{
      window.__autoapplySeq = (window.__autoapplySeq || 0) + 1;
      el.setAttribute(ATTR, 'aa-' + window.__autoapplySeq);
    }}
    return el.getAttribute(ATTR);
  }};"#,
        attr = js(REF_ATTR)
    )
}

/// Snapshot every question container as `ContainerSnapshot` JSON.
pub fn snapshot_containers() -> String {
    format!(
        r#"(() => {{
  {helper}
  const text = (el) => {{
    if (!el) return null;
    const t = (el.innerText || el.textContent || '').trim();
    return t.length ? t : null;
  }};
  return Array.from(document.querySelectorAll({containers})).map((c) => {{
    const legend = c.querySelector('legend');
    const label = c.querySelector('label');
    const snap = {{
      element: ref(c),
      legend_label: text(legend && legend.querySelector('span[aria-hidden="true"]')),
      label_span: text(label && label.querySelector('span[aria-hidden="true"]')),
      label_title: text(c.querySelector('.fb-dash-form-element__label-title')),
      label_text: text(label),
      full_text: text(c) || '',
      hint: text(c.querySelector('.artdeco-inline-feedback--error')),
      widget: null,
    }};
    const radios = Array.from(c.querySelectorAll('input[type="radio"]'));
    const select = c.querySelector('select');
    const field = c.querySelector('input[type="text"], input[type="number"], input[type="tel"], input:not([type]), textarea');
    if (radios.length) {{
      snap.widget = {{
        shape: 'choice_group',
        options: radios.map((r) => {{
          const l = (r.id && c.querySelector('label[for="' + CSS.escape(r.id) + '"]')) || r.closest('label');
          return {{
            element: ref(r),
            label: text(l),
            value: r.value || null,
            data_label: r.getAttribute('data-test-text-selectable-option__input'),
            checked: r.checked,
          }};
        }}),
      }};
    }} else if (select) {{
      snap.widget = {{
        shape: 'dropdown',
        element: ref(select),
        options: Array.from(select.options).map((o) => ({{
          element: ref(o),
          text: (o.textContent || '').trim(),
          value: o.value,
        }})),
      }};
    }} else if (field) {{
      const kind = field.tagName === 'TEXTAREA' ? 'text_area' : (field.type === 'number' ? 'number' : 'text');
      snap.widget = {{
        shape: 'text_field',
        element: ref(field),
        kind,
        input_mode: field.getAttribute('inputmode'),
      }};
    }}
    return snap;
  }});
}})()"#,
        helper = ref_helper(),
        containers = js(CONTAINER_SELECTOR),
    )
}

/// Locate the first rendered match of `selectors` as `AffordanceState` JSON,
/// or `null`.
pub fn find_affordance(selectors: &[&str]) -> String {
    format!(
        r#"(() => {{
  {helper}
  const el = {selectors}.map((s) => document.querySelector(s)).find((e) => e && e.offsetParent !== null);
  if (!el) return null;
  const enabled = !el.disabled && el.getAttribute('aria-disabled') !== 'true';
  return {{ element: ref(el), enabled }};
}})()"#,
        helper = ref_helper(),
        selectors = js_list(selectors),
    )
}

/// Whether any success indicator is rendered.
pub fn success_indicator() -> String {
    format!(
        r#"(() => {{
  if ({selectors}.some((s) => document.querySelector(s))) return true;
  const headings = {headings};
  return Array.from(document.querySelectorAll('h1, h2, h3')).some((h) =>
    headings.some((t) => (h.textContent || '').includes(t)));
}})()"#,
        selectors = js_list(SUCCESS_SELECTORS),
        headings = js_list(SUCCESS_HEADINGS),
    )
}

/// Run `body` against the tagged element `el`. `body` may refer to `el`
/// and must end by returning.
fn with_element(element: &str, body: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.querySelector('[' + {attr} + '="' + CSS.escape({element}) + '"]');
  if (!el || !el.isConnected) return {{ ok: false, reason: 'detached' }};
  {body}
}})()"#,
        attr = js(REF_ATTR),
        element = js(element),
    )
}

/// Pointer activation: press, release, click.
pub fn activate(element: &str) -> String {
    with_element(
        element,
        r#"if (el.disabled) return { ok: false, reason: 'disabled' };
  el.scrollIntoView({ block: 'center' });
  for (const type of ['mousedown', 'mouseup']) {
    el.dispatchEvent(new MouseEvent(type, { bubbles: true, cancelable: true, view: window }));
  }
  el.click();
  return { ok: true };"#,
    )
}

pub fn focus(element: &str) -> String {
    with_element(element, "el.focus();\n  return { ok: true };")
}

/// Set a field value through the native setter so framework bindings see it.
pub fn set_value(element: &str, value: &str) -> String {
    with_element(
        element,
        &format!(
            r#"const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype;
  Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, {value});
  return {{ ok: true }};"#,
            value = js(value)
        ),
    )
}

/// Append one character with the keyboard events a real keystroke fires.
pub fn append_char(element: &str, ch: char) -> String {
    with_element(
        element,
        &format!(
            r#"const key = {key};
  const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype;
  el.dispatchEvent(new KeyboardEvent('keydown', {{ key, bubbles: true }}));
  Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, el.value + key);
  el.dispatchEvent(new InputEvent('input', {{ data: key, inputType: 'insertText', bubbles: true }}));
  el.dispatchEvent(new KeyboardEvent('keyup', {{ key, bubbles: true }}));
  return {{ ok: true }};"#,
            key = js(ch.to_string())
        ),
    )
}

pub fn select_value(element: &str, option_value: &str) -> String {
    with_element(
        element,
        &format!(
            r#"el.value = {value};
  return {{ ok: true }};"#,
            value = js(option_value)
        ),
    )
}

/// Dispatch a bubbling event with the constructor matching its type.
pub fn dispatch(element: &str, event: &str) -> String {
    with_element(
        element,
        &format!(
            r#"const type = {event};
  const init = {{ bubbles: true, cancelable: true }};
  let ev;
  if (['click', 'mousedown', 'mouseup'].includes(type)) ev = new MouseEvent(type, {{ ...init, view: window }});
  else if (['focus', 'blur'].includes(type)) ev = new FocusEvent(type, init);
  else ev = new Event(type, init);
  el.dispatchEvent(ev);
  return {{ ok: true }};"#,
            event = js(event)
        ),
    )
}
