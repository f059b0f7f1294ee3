use crate::error::{Error, Result};

/// Splits the parameter list of a method descriptor into one entry per declared parameter.
///
/// Object parameters yield their internal (slash separated) class name. Primitives and arrays
/// yield `None`: an array of objects has no nameable type either, the whole component is
/// consumed so the list stays aligned with the declared parameters.
pub fn parse_param_types(desc: &str) -> Result<Vec<Option<&str>>> {
    let Some(params) = desc.strip_prefix('(') else {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    };

    let bytes = params.as_bytes();
    let mut out = Vec::new();
    let mut idx = 0usize;
    while idx < bytes.len() {
        match bytes[idx] {
            b')' => break,
            b'L' => {
                let end = class_name_end(params, idx, desc)?;
                out.push(Some(&params[idx + 1..end]));
                idx = end + 1;
            }
            b'[' => {
                while idx < bytes.len() && bytes[idx] == b'[' {
                    idx += 1;
                }
                if idx < bytes.len() && bytes[idx] == b'L' {
                    idx = class_name_end(params, idx, desc)? + 1;
                } else {
                    idx += 1;
                }
                out.push(None);
            }
            _ => {
                out.push(None);
                idx += 1;
            }
        }
    }
    Ok(out)
}

/// Rewrites every class name in `desc` through `map`, leaving names it does not know as-is.
///
/// Works for field and method descriptors alike.
pub fn remap_descriptor<'a, F>(desc: &str, mut map: F) -> Result<String>
where
    F: FnMut(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(desc.len());
    let mut rest = desc;
    while let Some(start) = rest.find('L') {
        out.push_str(&rest[..=start]);
        let tail = &rest[start + 1..];
        let Some(end) = tail.find(';') else {
            return Err(Error::UnterminatedClassName(desc.to_string()));
        };
        let name = &tail[..end];
        out.push_str(map(name).unwrap_or(name));
        out.push(';');
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Returns the simple name of an internal class name: everything after the last package (`/`)
/// or nesting (`$`) separator.
pub fn simple_class_name(internal_name: &str) -> &str {
    match internal_name.rfind(['/', '$']) {
        Some(idx) => &internal_name[idx + 1..],
        None => internal_name,
    }
}

fn class_name_end(params: &str, start: usize, desc: &str) -> Result<usize> {
    params[start..]
        .find(';')
        .map(|end| start + end)
        .ok_or_else(|| Error::UnterminatedClassName(desc.to_string()))
}
