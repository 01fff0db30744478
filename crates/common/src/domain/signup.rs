/// An approved user signup.
///
/// `compliant_username` is the stable MUR name used as the binding subject
/// for this user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub name: String,
    pub compliant_username: String,
}
