pub struct RegionCode {}

/// Region codes used by the tests. Only some of them have test metadata; the
/// others stand for regions the library knows nothing about.
impl RegionCode {
    pub fn aq() -> &'static str {
        "AQ"
    }

    pub fn ar() -> &'static str {
        "AR"
    }

    pub fn au() -> &'static str {
        "AU"
    }

    pub fn br() -> &'static str {
        "BR"
    }

    pub fn bs() -> &'static str {
        "BS"
    }

    pub fn co() -> &'static str {
        "CO"
    }

    pub fn cs() -> &'static str {
        "CS"
    }

    pub fn de() -> &'static str {
        "DE"
    }

    pub fn gb() -> &'static str {
        "GB"
    }

    pub fn it() -> &'static str {
        "IT"
    }

    pub fn nz() -> &'static str {
        "NZ"
    }

    pub fn sg() -> &'static str {
        "SG"
    }

    pub fn un001() -> &'static str {
        "001"
    }

    pub fn us() -> &'static str {
        "US"
    }

    /// Returns a region code string representing the "unknown" region.
    pub fn get_unknown() -> &'static str {
        Self::zz()
    }

    pub fn zz() -> &'static str {
        "ZZ"
    }
}
