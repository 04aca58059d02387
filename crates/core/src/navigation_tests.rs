// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    relative_path = { "/batches/42", false },
    bare_relative = { "settings", false },
    query_only = { "?tab=drafts", false },
    fragment = { "#top", false },
    colon_in_query = { "/search?q=a:b", false },
    https = { "https://example.com/x", true },
    http_upper = { "HTTP://example.com", true },
    protocol_relative = { "//cdn.example.com/a.js", true },
    mailto = { "mailto:ops@example.com", true },
    tel = { "tel:+15550100", true },
)]
fn external_by_href(href: &str, external: bool) {
    assert_eq!(LinkTarget::new(href).is_external(), external);
}

#[parameterized(
    blank = { "_blank", true },
    named_frame = { "preview", true },
    self_target = { "_self", false },
    self_upper = { "_SELF", false },
    empty = { "", false },
)]
fn external_by_target(target: &str, external: bool) {
    let link = LinkTarget::new("/batches").with_target(target);
    assert_eq!(link.is_external(), external);
}

#[test]
fn download_links_are_external() {
    assert!(LinkTarget::new("/export.csv").with_download().is_external());
}

#[test]
fn destination_route() {
    assert_eq!(Destination::Push("/a".into()).route(), Some("/a"));
    assert_eq!(Destination::Link("/b".into()).route(), Some("/b"));
    assert_eq!(Destination::Back.route(), None);
}

#[test]
fn destination_display() {
    assert_eq!(Destination::Replace("/x".into()).to_string(), "replace /x");
    assert_eq!(Destination::Forward.to_string(), "forward");
}
