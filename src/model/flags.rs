//! JVM access flags and their keyword rendering.

pub const ACC_PUBLIC: u32 = 0x0001;
pub const ACC_PRIVATE: u32 = 0x0002;
pub const ACC_PROTECTED: u32 = 0x0004;
pub const ACC_STATIC: u32 = 0x0008;
pub const ACC_FINAL: u32 = 0x0010;
/// Classes only. Shares its bit with `ACC_SYNCHRONIZED`.
pub const ACC_SUPER: u32 = 0x0020;
pub const ACC_SYNCHRONIZED: u32 = 0x0020;
pub const ACC_VOLATILE: u32 = 0x0040;
pub const ACC_BRIDGE: u32 = 0x0040;
pub const ACC_TRANSIENT: u32 = 0x0080;
pub const ACC_VARARGS: u32 = 0x0080;
pub const ACC_NATIVE: u32 = 0x0100;
pub const ACC_INTERFACE: u32 = 0x0200;
pub const ACC_ABSTRACT: u32 = 0x0400;
pub const ACC_STRICT: u32 = 0x0800;
pub const ACC_SYNTHETIC: u32 = 0x1000;
pub const ACC_ANNOTATION: u32 = 0x2000;
pub const ACC_ENUM: u32 = 0x4000;
pub const ACC_MANDATED: u32 = 0x8000;
/// Not a class-file flag; set by parsers for `@Deprecated` / the `Deprecated` attribute.
pub const ACC_DEPRECATED: u32 = 0x20000;

const CLASS_FLAGS: &[(u32, &str)] = &[
    (ACC_PUBLIC, "public"),
    (ACC_PRIVATE, "private"),
    (ACC_PROTECTED, "protected"),
    (ACC_STATIC, "static"),
    (ACC_FINAL, "final"),
    (ACC_SUPER, "super"),
    (ACC_INTERFACE, "interface"),
    (ACC_ABSTRACT, "abstract"),
    (ACC_SYNTHETIC, "synthetic"),
    (ACC_ANNOTATION, "annotation"),
    (ACC_ENUM, "enum"),
    (ACC_DEPRECATED, "deprecated"),
];

const METHOD_FLAGS: &[(u32, &str)] = &[
    (ACC_PUBLIC, "public"),
    (ACC_PRIVATE, "private"),
    (ACC_PROTECTED, "protected"),
    (ACC_STATIC, "static"),
    (ACC_FINAL, "final"),
    (ACC_SYNCHRONIZED, "synchronized"),
    (ACC_BRIDGE, "bridge"),
    (ACC_VARARGS, "varargs"),
    (ACC_NATIVE, "native"),
    (ACC_ABSTRACT, "abstract"),
    (ACC_STRICT, "strict"),
    (ACC_SYNTHETIC, "synthetic"),
    (ACC_MANDATED, "mandated"),
    (ACC_DEPRECATED, "deprecated"),
];

const FIELD_FLAGS: &[(u32, &str)] = &[
    (ACC_PUBLIC, "public"),
    (ACC_PRIVATE, "private"),
    (ACC_PROTECTED, "protected"),
    (ACC_STATIC, "static"),
    (ACC_FINAL, "final"),
    (ACC_VOLATILE, "volatile"),
    (ACC_TRANSIENT, "transient"),
    (ACC_SYNTHETIC, "synthetic"),
    (ACC_ENUM, "enum"),
    (ACC_DEPRECATED, "deprecated"),
];

fn render_flags(access: u32, table: &[(u32, &str)]) -> String {
    table
        .iter()
        .filter(|(bit, _)| access & bit != 0)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keyword list for class access flags, e.g. `public final super`.
#[must_use]
pub fn class_flags(access: u32) -> String {
    render_flags(access, CLASS_FLAGS)
}

/// Keyword list for method access flags.
#[must_use]
pub fn method_flags(access: u32) -> String {
    render_flags(access, METHOD_FLAGS)
}

/// Keyword list for field access flags.
#[must_use]
pub fn field_flags(access: u32) -> String {
    render_flags(access, FIELD_FLAGS)
}

#[must_use]
pub const fn is_synthetic(access: u32) -> bool {
    access & ACC_SYNTHETIC != 0
}

#[must_use]
pub const fn is_private(access: u32) -> bool {
    access & ACC_PRIVATE != 0
}

#[must_use]
pub const fn is_bridge(access: u32) -> bool {
    access & ACC_BRIDGE != 0
}

/// Public or protected, i.e. reachable from outside the declaring package.
#[must_use]
pub const fn is_api_visible(access: u32) -> bool {
    access & (ACC_PUBLIC | ACC_PROTECTED) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_flags() {
        assert_eq!(class_flags(ACC_PUBLIC | ACC_FINAL | ACC_SUPER), "public final super");
        assert_eq!(class_flags(0), "");
    }

    #[test]
    fn test_shared_bits_render_per_kind() {
        assert_eq!(method_flags(ACC_BRIDGE | ACC_SYNTHETIC), "bridge synthetic");
        assert_eq!(field_flags(ACC_VOLATILE), "volatile");
        assert_eq!(method_flags(ACC_VARARGS), "varargs");
        assert_eq!(field_flags(ACC_TRANSIENT), "transient");
    }

    #[test]
    fn test_predicates() {
        assert!(is_synthetic(ACC_SYNTHETIC | ACC_PUBLIC));
        assert!(is_private(ACC_PRIVATE));
        assert!(is_bridge(ACC_BRIDGE));
        assert!(is_api_visible(ACC_PROTECTED));
        assert!(!is_api_visible(ACC_PRIVATE | ACC_STATIC));
    }
}
