//! DOCTYPE classification for the "initial" insertion mode.
//!
//! [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
//!
//! All comparisons are ASCII case-insensitive.

use tern_dom::QuirksMode;

/// "The public identifier starts with: ..." (quirks mode).
const QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "+//silmaril//dtd html pro v0r11 19970101//",
    "-//as//dtd html 3.0 aswedit + extensions//",
    "-//advasoft ltd//dtd html 3.0 aswedit + extensions//",
    "-//ietf//dtd html 2.0 level 1//",
    "-//ietf//dtd html 2.0 level 2//",
    "-//ietf//dtd html 2.0 strict level 1//",
    "-//ietf//dtd html 2.0 strict level 2//",
    "-//ietf//dtd html 2.0 strict//",
    "-//ietf//dtd html 2.0//",
    "-//ietf//dtd html 2.1e//",
    "-//ietf//dtd html 3.0//",
    "-//ietf//dtd html 3.2 final//",
    "-//ietf//dtd html 3.2//",
    "-//ietf//dtd html 3//",
    "-//ietf//dtd html level 0//",
    "-//ietf//dtd html level 1//",
    "-//ietf//dtd html level 2//",
    "-//ietf//dtd html level 3//",
    "-//ietf//dtd html strict level 0//",
    "-//ietf//dtd html strict level 1//",
    "-//ietf//dtd html strict level 2//",
    "-//ietf//dtd html strict level 3//",
    "-//ietf//dtd html strict//",
    "-//ietf//dtd html//",
    "-//metrius//dtd metrius presentational//",
    "-//microsoft//dtd internet explorer 2.0 html strict//",
    "-//microsoft//dtd internet explorer 2.0 html//",
    "-//microsoft//dtd internet explorer 2.0 tables//",
    "-//microsoft//dtd internet explorer 3.0 html strict//",
    "-//microsoft//dtd internet explorer 3.0 html//",
    "-//microsoft//dtd internet explorer 3.0 tables//",
    "-//netscape comm. corp.//dtd html//",
    "-//netscape comm. corp.//dtd strict html//",
    "-//o'reilly and associates//dtd html 2.0//",
    "-//o'reilly and associates//dtd html extended 1.0//",
    "-//o'reilly and associates//dtd html extended relaxed 1.0//",
    "-//sq//dtd html 2.0 hotmetal + extensions//",
    "-//softquad software//dtd hotmetal pro 6.0::19990601::extensions to html 4.0//",
    "-//softquad//dtd hotmetal pro 4.0::19971010::extensions to html 4.0//",
    "-//spyglass//dtd html 2.0 extended//",
    "-//sun microsystems corp.//dtd hotjava html//",
    "-//sun microsystems corp.//dtd hotjava strict html//",
    "-//w3c//dtd html 3 1995-03-24//",
    "-//w3c//dtd html 3.2 draft//",
    "-//w3c//dtd html 3.2 final//",
    "-//w3c//dtd html 3.2//",
    "-//w3c//dtd html 3.2s draft//",
    "-//w3c//dtd html 4.0 frameset//",
    "-//w3c//dtd html 4.0 transitional//",
    "-//w3c//dtd html experimental 19960712//",
    "-//w3c//dtd html experimental 970421//",
    "-//w3c//dtd w3 html//",
    "-//w3o//dtd w3 html 3.0//",
    "-//webtechs//dtd mozilla html 2.0//",
    "-//webtechs//dtd mozilla html//",
];

/// "The public identifier is set to: ..." (quirks mode).
const QUIRKS_PUBLIC_IDS: &[&str] = &[
    "-//w3o//dtd w3 html strict 3.0//en//",
    "-/w3c/dtd html 4.0 transitional/en",
    "html",
];

/// "The system identifier is set to: ..." (quirks mode).
const QUIRKS_SYSTEM_IDS: &[&str] = &["http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd"];

/// HTML 4.01 public identifiers whose classification depends on whether a
/// system identifier is present.
const HTML401_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//w3c//dtd html 4.01 frameset//",
    "-//w3c//dtd html 4.01 transitional//",
];

/// "The public identifier starts with: ..." (limited-quirks mode).
const LIMITED_QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//w3c//dtd xhtml 1.0 frameset//",
    "-//w3c//dtd xhtml 1.0 transitional//",
];

fn starts_with_any(value: &str, prefixes: &[&str]) -> bool {
    let value = value.to_ascii_lowercase();
    prefixes.iter().any(|prefix| value.starts_with(prefix))
}

fn equals_any(value: &str, candidates: &[&str]) -> bool {
    candidates
        .iter()
        .any(|candidate| value.eq_ignore_ascii_case(candidate))
}

/// "...then set the Document to quirks mode" conditions, apart from the
/// force-quirks flag.
///
/// `None` means the identifier is missing, which is distinct from the empty
/// string.
#[must_use]
pub fn is_quirks(name: Option<&str>, public_id: Option<&str>, system_id: Option<&str>) -> bool {
    // "The name is not "html"."
    if name != Some("html") {
        return true;
    }
    if let Some(public_id) = public_id {
        if equals_any(public_id, QUIRKS_PUBLIC_IDS)
            || starts_with_any(public_id, QUIRKS_PUBLIC_ID_PREFIXES)
        {
            return true;
        }
        // "The system identifier is missing and the public identifier starts
        // with: "-//W3C//DTD HTML 4.01 Frameset//", "-//W3C//DTD HTML 4.01
        // Transitional//""
        if system_id.is_none() && starts_with_any(public_id, HTML401_PUBLIC_ID_PREFIXES) {
            return true;
        }
    }
    system_id.is_some_and(|system_id| equals_any(system_id, QUIRKS_SYSTEM_IDS))
}

/// "Otherwise, if the document is not an iframe srcdoc document, and the
/// parser cannot change the mode flag is false, and the DOCTYPE token matches
/// one of the conditions in the following list, then set the Document to
/// limited-quirks mode"
#[must_use]
pub fn is_limited_quirks(public_id: Option<&str>, system_id: Option<&str>) -> bool {
    let Some(public_id) = public_id else {
        return false;
    };
    starts_with_any(public_id, LIMITED_QUIRKS_PUBLIC_ID_PREFIXES)
        || (system_id.is_some() && starts_with_any(public_id, HTML401_PUBLIC_ID_PREFIXES))
}

/// The document mode a DOCTYPE token selects.
#[must_use]
pub fn quirks_mode_for(
    name: Option<&str>,
    public_id: Option<&str>,
    system_id: Option<&str>,
    force_quirks: bool,
) -> QuirksMode {
    if force_quirks || is_quirks(name, public_id, system_id) {
        QuirksMode::Quirks
    } else if is_limited_quirks(public_id, system_id) {
        QuirksMode::LimitedQuirks
    } else {
        QuirksMode::NoQuirks
    }
}

/// "If the DOCTYPE token's name is not "html", or the token's public
/// identifier is not missing, or the token's system identifier is neither
/// missing nor "about:legacy-compat", then there is a parse error."
#[must_use]
pub fn is_conforming(name: Option<&str>, public_id: Option<&str>, system_id: Option<&str>) -> bool {
    name == Some("html")
        && public_id.is_none()
        && system_id.is_none_or(|system_id| system_id == "about:legacy-compat")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html5_doctype_is_no_quirks() {
        assert_eq!(
            quirks_mode_for(Some("html"), None, None, false),
            QuirksMode::NoQuirks
        );
        let legacy_compat = Some("about:legacy-compat");
        assert!(is_conforming(Some("html"), None, legacy_compat));
    }

    #[test]
    fn test_quirky_identifiers() {
        assert!(is_quirks(
            Some("html"),
            None,
            Some("http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd")
        ));
        assert!(is_quirks(Some("html"), Some("HTML"), None));
        let html2 = Some("-//IETF//DTD HTML 2.0//EN");
        assert!(is_quirks(Some("html"), html2, None));
        assert!(is_quirks(None, None, None));
        assert!(is_quirks(Some("svg"), None, None));
    }

    #[test]
    fn test_html401_depends_on_system_id() {
        let public = Some("-//W3C//DTD HTML 4.01 Transitional//EN");
        let loose = Some("http://www.w3.org/TR/html4/loose.dtd");
        assert_eq!(
            quirks_mode_for(Some("html"), public, None, false),
            QuirksMode::Quirks
        );
        assert_eq!(
            quirks_mode_for(Some("html"), public, loose, false),
            QuirksMode::LimitedQuirks
        );
    }

    #[test]
    fn test_xhtml_transitional_is_limited_quirks() {
        assert_eq!(
            quirks_mode_for(
                Some("html"),
                Some("-//W3C//DTD XHTML 1.0 Transitional//EN"),
                None,
                false
            ),
            QuirksMode::LimitedQuirks
        );
        assert_eq!(
            quirks_mode_for(Some("html"), None, None, true),
            QuirksMode::Quirks
        );
    }
}
