use std::fmt;

/// Status codes returned across the plugin boundary.
///
/// The numeric values are part of the binary contract and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    Ok = 0,
    Failed = 1,
    ErrFatal = 2,
    ErrUnknown = 3,
    ErrMissingHostFeature = 4,
    ErrUnsupported = 5,
    ErrExists = 6,
    ErrFormat = 7,
    ErrMemory = 8,
    ErrBadHandle = 9,
    ErrBadIndex = 10,
    ErrValue = 11,
    ReplyYes = 12,
    ReplyNo = 13,
    ReplyDefault = 14,
}

impl Status {
    pub const ALL: [Status; 15] = [
        Status::Ok,
        Status::Failed,
        Status::ErrFatal,
        Status::ErrUnknown,
        Status::ErrMissingHostFeature,
        Status::ErrUnsupported,
        Status::ErrExists,
        Status::ErrFormat,
        Status::ErrMemory,
        Status::ErrBadHandle,
        Status::ErrBadIndex,
        Status::ErrValue,
        Status::ReplyYes,
        Status::ReplyNo,
        Status::ReplyDefault,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Status> {
        Status::ALL.iter().copied().find(|s| s.code() == code)
    }

    /// True for `Ok` and the three reply codes, which are not failures.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Status::Ok | Status::ReplyYes | Status::ReplyNo | Status::ReplyDefault
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::Ok => "kOfxStatOK",
            Status::Failed => "kOfxStatFailed",
            Status::ErrFatal => "kOfxStatErrFatal",
            Status::ErrUnknown => "kOfxStatErrUnknown",
            Status::ErrMissingHostFeature => "kOfxStatErrMissingHostFeature",
            Status::ErrUnsupported => "kOfxStatErrUnsupported",
            Status::ErrExists => "kOfxStatErrExists",
            Status::ErrFormat => "kOfxStatErrFormat",
            Status::ErrMemory => "kOfxStatErrMemory",
            Status::ErrBadHandle => "kOfxStatErrBadHandle",
            Status::ErrBadIndex => "kOfxStatErrBadIndex",
            Status::ErrValue => "kOfxStatErrValue",
            Status::ReplyYes => "kOfxStatReplyYes",
            Status::ReplyNo => "kOfxStatReplyNo",
            Status::ReplyDefault => "kOfxStatReplyDefault",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Status::Ok.code(), 0);
        assert_eq!(Status::Failed.code(), 1);
        assert_eq!(Status::ErrMissingHostFeature.code(), 4);
        assert_eq!(Status::ErrBadHandle.code(), 9);
        assert_eq!(Status::ErrValue.code(), 11);
        assert_eq!(Status::ReplyDefault.code(), 14);
    }

    #[test]
    fn from_code_inverts_code() {
        for s in Status::ALL {
            assert_eq!(Status::from_code(s.code()), Some(s));
        }
        assert_eq!(Status::from_code(99), None);
    }

    #[test]
    fn replies_are_not_failures() {
        assert!(Status::ReplyDefault.is_success());
        assert!(!Status::Failed.is_success());
        assert!(!Status::ErrValue.is_success());
    }
}
