//! Request body for cache invalidations.
//!
//! The service expects this exact layout, one element per line:
//!
//! ```xml
//! <properties>
//! <property>
//! <name>{property}</name>
//! <paths>
//! <path>{url}</path>
//! </paths>
//! </property>
//! </properties>
//! ```

use quick_xml::escape::escape;

/// API method that accepts invalidation requests.
pub const INVALIDATIONS_METHOD: &str = "invalidations";

/// Build the body of an invalidation request for one property.
///
/// The property name and every URL are XML-escaped.
///
/// ```
/// use level3_client::invalidation_body;
///
/// let body = invalidation_body("www.example.com", ["/a.css", "/b.js"]);
/// assert!(body.contains("<name>www.example.com</name>"));
/// assert!(body.contains("<path>/a.css</path>\n<path>/b.js</path>"));
/// ```
#[must_use]
pub fn invalidation_body<I, S>(property_name: &str, urls: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let paths = urls
        .into_iter()
        .map(|url| format!("<path>{}</path>", escape(url.as_ref())))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\n<properties>\n<property>\n<name>{}</name>\n<paths>\n{paths}\n</paths>\n</property>\n</properties>\n",
        escape(property_name)
    )
}
