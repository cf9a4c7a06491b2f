use kernel::id::Id;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupMarker;
pub type GroupId = Id<GroupMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_id_new() {
        let group_id = GroupId::new();
        assert_eq!(group_id.as_uuid().get_version_num(), 4);
    }
}
