//! Server-side HTML for every page the site renders.

use std::fmt::Write as _;

use realty_listings::inquiries::Inquiry;
use realty_listings::listings::PropertyView;
use realty_listings::validation::ValidationError;

const SITE_NAME: &str = "Realty Listings";

/// Wraps `body` in the shared page chrome.
pub(crate) fn layout(title: &str, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(
        html,
        "<title>{} | {}</title>",
        escape_html(title),
        SITE_NAME
    );
    html.push_str("<link rel=\"stylesheet\" href=\"/public/styles.css\">\n");
    html.push_str("</head>\n<body>\n<header class=\"site-header\"><nav class=\"container\">");
    let _ = write!(html, "<a class=\"brand\" href=\"/\">{SITE_NAME}</a>");
    html.push_str(
        "<a href=\"/\">Home</a><a href=\"/about\">About</a><a href=\"/contact\">Contact</a>",
    );
    html.push_str("</nav></header>\n<main>\n");
    html.push_str(body);
    html.push_str("\n</main>\n<footer class=\"site-footer\"><div class=\"container\">");
    let _ = write!(html, "<p>&copy; {SITE_NAME}</p>");
    html.push_str("</div></footer>\n</body>\n</html>\n");
    html
}

pub(crate) fn index(properties: &[PropertyView]) -> String {
    let mut body = String::from("<div class=\"container\">\n<h1>Available Properties</h1>\n");

    if properties.is_empty() {
        body.push_str("<p class=\"empty\">No properties are listed right now. Check back soon.</p>\n");
    } else {
        body.push_str("<ul class=\"property-grid\">\n");
        for property in properties {
            body.push_str("<li class=\"property-card\">");
            if !property.cover_image_url.is_empty() {
                let _ = write!(
                    body,
                    "<img src=\"{}\" alt=\"{}\">",
                    escape_html(&property.cover_image_url),
                    escape_html(&property.title)
                );
            }
            let _ = write!(
                body,
                "<h2><a href=\"/properties/{}\">{}</a></h2>",
                property.id,
                escape_html(&property.title)
            );
            if !property.address.is_empty() {
                let _ = write!(
                    body,
                    "<p class=\"address\">{}</p>",
                    escape_html(&property.address)
                );
            }
            let _ = write!(
                body,
                "<p class=\"specs\">{} sq ft &middot; ₹{} per sq ft</p>",
                format_amount(property.sq_ft),
                format_amount(property.price_per_sq_ft)
            );
            let _ = write!(
                body,
                "<p class=\"price\">₹{}</p>",
                format_amount(property.total_price)
            );
            body.push_str("</li>\n");
        }
        body.push_str("</ul>\n");
    }

    body.push_str("</div>");
    layout("Home", &body)
}

/// Detail page; `form_error` re-renders the inquiry form with a rejection message.
pub(crate) fn property_detail(property: &PropertyView, form_error: Option<&ValidationError>) -> String {
    let mut body = String::from("<div class=\"container property-detail\">\n");
    let _ = writeln!(body, "<h1>{}</h1>", escape_html(&property.title));

    if !property.cover_image_url.is_empty() {
        let _ = writeln!(
            body,
            "<img class=\"cover\" src=\"{}\" alt=\"{}\">",
            escape_html(&property.cover_image_url),
            escape_html(&property.title)
        );
    }
    if !property.address.is_empty() {
        let _ = writeln!(
            body,
            "<p class=\"address\">{}</p>",
            escape_html(&property.address)
        );
    }
    if !property.description.is_empty() {
        let _ = writeln!(
            body,
            "<p class=\"description\">{}</p>",
            escape_html(&property.description)
        );
    }

    body.push_str("<dl class=\"facts\">\n");
    let facts = [
        ("Area", format!("{} sq ft", format_amount(property.sq_ft))),
        (
            "Price per sq ft",
            format!("₹{}", format_amount(property.price_per_sq_ft)),
        ),
        ("Total price", format!("₹{}", format_amount(property.total_price))),
        ("Owner", property.owner_name.clone()),
        ("Broker", property.broker_name.clone()),
        ("Broker phone", property.broker_phone.clone()),
    ];
    for (label, value) in facts {
        let _ = writeln!(body, "<dt>{label}</dt><dd>{}</dd>", escape_html(&value));
    }
    body.push_str("</dl>\n");

    body.push_str("<section class=\"inquiry\">\n<h2>Interested? Send an inquiry</h2>\n");
    if let Some(err) = form_error {
        let _ = writeln!(
            body,
            "<p class=\"form-error\" role=\"alert\">Please check the form: {}.</p>",
            escape_html(&err.to_string())
        );
    }
    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"/properties/{}/inquiries\">",
        property.id
    );
    for (name, label, kind) in [
        ("name", "Name", "text"),
        ("phone", "Phone", "tel"),
        ("email", "Email", "email"),
    ] {
        let _ = writeln!(
            body,
            "<label>{label} <input type=\"{kind}\" name=\"{name}\" required></label>"
        );
    }
    body.push_str("<button type=\"submit\">Send inquiry</button>\n</form>\n</section>\n");
    body.push_str("<p><a href=\"/\">&larr; Back to all properties</a></p>\n</div>");

    layout(&property.title, &body)
}

pub(crate) fn inquiry_received(property: &PropertyView, inquiry: &Inquiry) -> String {
    let mut body = String::from("<div class=\"container\">\n<h1>Thank you!</h1>\n");
    let _ = writeln!(
        body,
        "<p>{}, your inquiry about <a href=\"/properties/{}\">{}</a> has been received. \
         {} will reach out at {} or {}.</p>",
        escape_html(&inquiry.name),
        property.id,
        escape_html(&property.title),
        escape_html(&property.broker_name),
        escape_html(&inquiry.phone),
        escape_html(&inquiry.email)
    );
    body.push_str("<p><a href=\"/\">&larr; Back to all properties</a></p>\n</div>");
    layout("Inquiry Received", &body)
}

pub(crate) fn about() -> String {
    let body = "<div class=\"container\">\n<h1>About Us</h1>\n\
        <p>We connect buyers with owners and brokers across the country. Every listing shows \
        its area, price per square foot and the total asking price up front.</p>\n</div>";
    layout("About", body)
}

pub(crate) fn contact() -> String {
    let body = "<div class=\"container\">\n<h1>Contact Us</h1>\n\
        <p>Questions about a listing? Open the property and send an inquiry; the listing \
        broker will get back to you.</p>\n\
        <p>For anything else, reach our office during business hours.</p>\n</div>";
    layout("Contact Us", body)
}

/// Minimal body used for every 404 response.
pub(crate) fn not_found(title: &str, heading: &str) -> String {
    let body = format!(
        "<div class=\"container\"><h2>{}</h2></div>",
        escape_html(heading)
    );
    layout(title, &body)
}

pub(crate) fn server_error() -> String {
    layout(
        "Something Went Wrong",
        "<div class=\"container\"><h2>Something went wrong</h2>\
         <p>We could not load this page right now. Please try again shortly.</p></div>",
    )
}

/// Groups thousands and keeps two decimals only when there is a fractional part.
pub(crate) fn format_amount(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as u128;
    let whole = cents_total / 100;
    let cents = cents_total % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents_total > 0 { "-" } else { "" };
    if cents == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{cents:02}")
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
