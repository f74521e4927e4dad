//! Document bindings
//!
//! Native closures share the renderer's document; they never copy it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use mouseless_core::document::{Document, Node, NodeId};
use mouseless_core::markup::MarkupParser;
use rquickjs::convert::Coerced;
use rquickjs::function::Opt;
use rquickjs::object::Accessor;
use rquickjs::{Ctx, Function, Object, Value};
use tracing::{debug, warn};

/// State captured by every native closure of one context
#[derive(Clone)]
pub(crate) struct Bridge {
    doc: Rc<RefCell<Document>>,
    parser: Rc<dyn MarkupParser>,
    mutated: Rc<Cell<bool>>,
}

impl Bridge {
    pub(crate) fn new(doc: Rc<RefCell<Document>>, parser: Rc<dyn MarkupParser>) -> Self {
        Self {
            doc,
            parser,
            mutated: Rc::new(Cell::new(false)),
        }
    }

    /// Whether script changed the document since the last call
    pub(crate) fn take_mutation(&self) -> bool {
        self.mutated.replace(false)
    }

    /// Replace the children of `target` with freshly parsed markup
    ///
    /// Markup that fails to parse leaves the children untouched.
    fn set_inner_html(&self, target: NodeId, html: &str) {
        let specs = match self.parser.parse_clean(html) {
            Ok(specs) => specs,
            Err(err) => {
                warn!(%err, "innerHTML markup rejected");
                return;
            }
        };
        let Ok(mut doc) = self.doc.try_borrow_mut() else {
            warn!("document busy, innerHTML ignored");
            return;
        };
        if doc.replace_children(target, specs) {
            self.mutated.set(true);
        } else {
            debug!(?target, "innerHTML on a removed element ignored");
        }
    }
}

/// Install the `document` global
pub(crate) fn install_document<'js>(ctx: &Ctx<'js>, bridge: Bridge) -> rquickjs::Result<()> {
    let document = Object::new(ctx.clone())?;
    document.set(
        "getElementById",
        Function::new(
            ctx.clone(),
            move |ctx: Ctx<'js>, query: Opt<Value<'js>>| -> rquickjs::Result<Value<'js>> {
                get_element_by_id(&ctx, &bridge, query.0.as_ref())
            },
        )?,
    )?;
    ctx.globals().set("document", document)?;
    Ok(())
}

fn get_element_by_id<'js>(
    ctx: &Ctx<'js>,
    bridge: &Bridge,
    query: Option<&Value<'js>>,
) -> rquickjs::Result<Value<'js>> {
    let undefined = Value::new_undefined(ctx.clone());
    let Some(query) = query.and_then(Value::as_string) else {
        return Ok(undefined);
    };
    let query = query.to_string()?;

    let Ok(doc) = bridge.doc.try_borrow() else {
        warn!("document busy, getElementById ignored");
        return Ok(undefined);
    };
    let found = doc
        .find_by_id(&query)
        .and_then(|id| doc.get(id).map(|node| (id, node)));
    match found {
        Some((id, node)) => Ok(construct_element(ctx, bridge, id, node)?.into_value()),
        None => Ok(undefined),
    }
}

/// Build a fresh element object for `node`
fn construct_element<'js>(
    ctx: &Ctx<'js>,
    bridge: &Bridge,
    id: NodeId,
    node: &Node,
) -> rquickjs::Result<Object<'js>> {
    let element = Object::new(ctx.clone())?;
    // Reverse order so the first occurrence of a repeated attribute wins
    for (name, value) in node.attributes.iter().rev() {
        element.set(name.as_str(), value.as_str())?;
    }

    let target = bridge.clone();
    element.prop(
        "innerHTML",
        Accessor::new_set(move |html: Coerced<String>| {
            target.set_inner_html(id, &html.0);
        }),
    )?;
    Ok(element)
}
